mod bound;
pub mod constants;
mod identifier;
pub(crate) mod lattice;

pub use bound::{FaceWindow, LatLonBounds};
pub(crate) use bound::{face_window, sample_step};
pub use constants::{
    AREA_OF_EARTH, AUTHALIC_RADIUS, IDENTIFIER_VERSION, MAX_RESOLUTION, NUMBER_OF_FACES,
    NUMBER_OF_PENTAGON_CELLS,
};
pub use identifier::{decode_cell_identifier, generate_cell_identifier};
pub(crate) use identifier::scale_degrees;
pub use lattice::{AxisOrder, GridGeometry, LatticeIndex};
