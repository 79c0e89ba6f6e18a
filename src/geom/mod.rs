mod parse;

pub use parse::{parse_geojson, parse_geometry, parse_wkt};
