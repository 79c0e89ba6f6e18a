mod icosahedron;
mod isea;

pub use isea::IseaProjection;
