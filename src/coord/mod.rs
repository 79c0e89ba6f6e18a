mod face;

pub use face::FaceCoordinate;

use crate::error::GridError;
use geo_types::Point;

/// Trait for types that can provide geographic coordinates.
///
/// Implemented for `(f64, f64)` tuples and `geo_types::Point<f64>`, both read as
/// `(longitude, latitude)`. This allows functions to accept either type.
pub trait Coordinate {
    /// Returns the x-coordinate (longitude).
    fn x(&self) -> f64;
    /// Returns the y-coordinate (latitude).
    fn y(&self) -> f64;
}

impl Coordinate for (f64, f64) {
    fn x(&self) -> f64 {
        self.0
    }
    fn y(&self) -> f64 {
        self.1
    }
}

impl Coordinate for Point<f64> {
    fn x(&self) -> f64 {
        Point::x(*self)
    }
    fn y(&self) -> f64 {
        Point::y(*self)
    }
}

/// Checks that latitude and longitude are finite and within `[-90, 90]` and `[-180, 180]`.
pub fn validate_lat_lon(lat: f64, lon: f64) -> Result<(), GridError> {
    if !lat.is_finite() || !lon.is_finite() || lat.abs() > 90.0 || lon.abs() > 180.0 {
        return Err(GridError::InvalidCoordinate { lat, lon });
    }
    Ok(())
}

/// Wraps a longitude into `[-180, 180)`.
pub fn normalize_lon(lon: f64) -> f64 {
    if (-180.0..180.0).contains(&lon) {
        return lon;
    }
    let wrapped = (lon + 180.0).rem_euclid(360.0) - 180.0;
    // rem_euclid can round up to the modulus itself
    if wrapped >= 180.0 { wrapped - 360.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_trait_tuple() {
        let tuple = (8.69, 49.41);
        assert_eq!(tuple.x(), 8.69);
        assert_eq!(tuple.y(), 49.41);
    }

    #[test]
    fn test_coordinate_trait_point() {
        let point = Point::new(8.69, 49.41);
        assert_eq!(point.x(), 8.69);
        assert_eq!(point.y(), 49.41);
    }

    #[test]
    fn test_validate_lat_lon() {
        assert!(validate_lat_lon(49.41, 8.69).is_ok());
        assert!(validate_lat_lon(-90.0, 180.0).is_ok());
        assert!(matches!(
            validate_lat_lon(90.5, 0.0),
            Err(GridError::InvalidCoordinate { .. })
        ));
        assert!(validate_lat_lon(0.0, -180.1).is_err());
        assert!(validate_lat_lon(f64::NAN, 0.0).is_err());
        assert!(validate_lat_lon(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_normalize_lon() {
        assert_eq!(normalize_lon(0.0), 0.0);
        assert_eq!(normalize_lon(180.0), -180.0);
        assert_eq!(normalize_lon(-180.0), -180.0);
        assert!((normalize_lon(190.0) - (-170.0)).abs() < 1e-12);
        assert!((normalize_lon(-190.0) - 170.0).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_lon_keeps_in_range_values() {
        for lon in [8.69, -0.1278, 151.21, -179.999_999, 179.999_999_9] {
            assert_eq!(normalize_lon(lon), lon);
        }
    }
}
