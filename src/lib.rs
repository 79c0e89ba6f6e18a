//! # isea3h-rs
//!
//! An ISEA aperture 3 hexagon (ISEA3H) discrete global grid. The sphere is projected
//! onto the 20 faces of an icosahedron with Snyder's equal-area projection, each face
//! is tiled with a hexagonal lattice, and lattice centers are mapped back to the
//! sphere. Every resolution has `20 * H(r)` hexagons and 12 pentagons.
//!
//! There are currently three main entry points.
//!
//! ### 1. `Isea3h` - Point and Bound Lookups
//!
//! ```
//! use isea3h_rs::Isea3h;
//!
//! # fn main() -> Result<(), isea3h_rs::GridError> {
//! let grid = Isea3h::builder().resolution(9).build()?;
//!
//! let cell = grid.cell_for_location(49.41, 8.69)?;
//! println!("{} at ({}, {})", cell.id(), cell.lat(), cell.lon());
//!
//! let (lat, lon) = (cell.lat(), cell.lon());
//! let cells = grid.cells_for_bound(lat - 0.5, lat + 0.5, lon - 0.5, lon + 0.5)?;
//! assert!(cells.contains(&cell));
//! # Ok(())
//! # }
//! ```
//!
//! ### 2. `GridCell` - Identifiers and Export
//!
//! ```
//! use isea3h_rs::{GridCell, Isea3h, cells_to_feature_collection};
//!
//! # fn main() -> Result<(), isea3h_rs::GridError> {
//! let grid = Isea3h::new(4)?;
//! let cell = grid.cell_for_location(-33.87, 151.21)?;
//! assert_eq!(GridCell::from_id(&cell.id())?, cell);
//!
//! let collection = cells_to_feature_collection(&[cell]);
//! println!("{}", collection);
//! # Ok(())
//! # }
//! ```
//!
//! ### 3. Geometries
//!
//! WKT or GeoJSON strings can be turned into cells directly:
//!
//! ```
//! use isea3h_rs::{Isea3h, parse_geometry};
//!
//! # fn main() -> Result<(), isea3h_rs::GridError> {
//! let grid = Isea3h::new(7)?;
//! let geometry = parse_geometry(r#"{"type":"Point","coordinates":[-0.1278,51.5074]}"#)?;
//! let cells = grid.cells_for_geometry(geometry)?;
//! assert_eq!(cells.len(), 1);
//! # Ok(())
//! # }
//! ```
//!

pub mod cell;
pub mod coord;
pub mod error;
pub mod geom;
pub mod grid;
pub mod index;
pub mod projection;

pub use cell::{GridCell, cells_to_feature_collection};
pub use coord::{Coordinate, FaceCoordinate, normalize_lon, validate_lat_lon};
pub use error::{ErrorKind, GridError};
pub use geom::{parse_geojson, parse_geometry, parse_wkt};
pub use grid::{Isea3h, Isea3hBuilder};
pub use index::{
    AREA_OF_EARTH, AUTHALIC_RADIUS, AxisOrder, FaceWindow, GridGeometry, IDENTIFIER_VERSION,
    LatLonBounds, LatticeIndex, MAX_RESOLUTION, NUMBER_OF_FACES, NUMBER_OF_PENTAGON_CELLS,
    decode_cell_identifier, generate_cell_identifier,
};
pub use projection::IseaProjection;

pub use geo_types;
