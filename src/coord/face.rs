/// A point on the plane of one icosahedron face.
///
/// The origin is the face center and units are metres. Coordinates of different
/// faces live in different planes and are not comparable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceCoordinate {
    /// Face id (1-20)
    pub face: u8,
    pub x: f64,
    pub y: f64,
}

impl FaceCoordinate {
    pub fn new(face: u8, x: f64, y: f64) -> Self {
        Self { face, x, y }
    }

    /// Euclidean distance to another point on the same face.
    pub fn distance_to(&self, other: &FaceCoordinate) -> f64 {
        debug_assert_eq!(self.face, other.face, "distance across faces");
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_to() {
        let a = FaceCoordinate::new(3, 0.0, 0.0);
        let b = FaceCoordinate::new(3, 3.0, 4.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
        assert!((b.distance_to(&a) - 5.0).abs() < 1e-12);
        assert_eq!(a.distance_to(&a), 0.0);
    }
}
