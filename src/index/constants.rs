/// Identifier version for encoding/decoding
pub const IDENTIFIER_VERSION: u8 = 1;

/// Scale factor applied to cell center degrees (six decimal places, ~0.1 m).
///
/// Used both for cell identity and for identifiers, so two cells are equal exactly
/// when their identifiers are.
pub(crate) const SCALE_FACTOR: f64 = 1_000_000.0;

/// Surface area of the WGS84 ellipsoid in square metres.
pub const AREA_OF_EARTH: f64 = 510_065_621_724_088.5;

/// Radius of the sphere with the same surface area as the WGS84 ellipsoid, in metres.
pub const AUTHALIC_RADIUS: f64 = 6_371_007.180_918_475;

/// Number of faces of the icosahedron
pub const NUMBER_OF_FACES: u8 = 20;

/// Number of pentagon cells, one per icosahedron vertex, at every resolution
pub const NUMBER_OF_PENTAGON_CELLS: u64 = 12;

/// Maximum resolution
pub const MAX_RESOLUTION: u8 = 30;

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_authalic_radius_matches_area() {
        let radius = (AREA_OF_EARTH / (4.0 * PI)).sqrt();
        assert!((radius - AUTHALIC_RADIUS).abs() < 1e-3);
    }
}
