use crate::index::constants::NUMBER_OF_FACES;
use std::f64::consts::PI;
use std::ops::Add;

/// A 3D vector on or around the unit sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const NORTH: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 1.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Unit vector for a latitude/longitude in radians.
    pub fn from_lat_lon(lat: f64, lon: f64) -> Self {
        let (sin_lat, cos_lat) = lat.sin_cos();
        let (sin_lon, cos_lon) = lon.sin_cos();
        Self::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat)
    }

    /// Latitude/longitude in radians.
    pub fn to_lat_lon(self) -> (f64, f64) {
        (self.z.atan2(self.x.hypot(self.y)), self.y.atan2(self.x))
    }

    pub fn dot(&self, other: &Vec3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Vec3) -> Vec3 {
        Vec3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn normalize(self) -> Vec3 {
        self.scale(1.0 / self.norm())
    }

    pub fn scale(self, factor: f64) -> Vec3 {
        Vec3::new(self.x * factor, self.y * factor, self.z * factor)
    }

    /// Great circle angle to another unit vector, stable for tiny and large angles.
    pub fn angle_to(&self, other: &Vec3) -> f64 {
        self.cross(other).norm().atan2(self.dot(other))
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

/// One triangular face of the icosahedron, in the icosahedron's own frame.
///
/// The face plane has its origin at the center, +y pointing to frame north and +x
/// to frame east. `tip_azimuth` is the azimuth of the vertex that lies due north (0)
/// or due south (pi) of the center.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Face {
    pub id: u8,
    pub center: Vec3,
    pub north: Vec3,
    pub east: Vec3,
    pub tip_azimuth: f64,
    pub vertices: [Vec3; 3],
}

impl Face {
    fn new(id: u8, vertices: [Vec3; 3], tip_azimuth: f64) -> Self {
        let center = (vertices[0] + vertices[1] + vertices[2]).normalize();
        let east = Vec3::NORTH.cross(&center).normalize();
        let north = center.cross(&east);
        Self {
            id,
            center,
            north,
            east,
            tip_azimuth,
            vertices,
        }
    }
}

/// Builds the 20 faces with a vertex at each pole of the frame.
///
/// Faces 1-5 surround the north vertex, 6-10 and 11-15 form the equatorial belt
/// (pointing south and north respectively) and 16-20 surround the south vertex.
pub(crate) fn faces() -> Vec<Face> {
    let ring_lat = 0.5_f64.atan();
    let step = 2.0 * PI / 5.0;
    let top = Vec3::NORTH;
    let bottom = Vec3::new(0.0, 0.0, -1.0);
    let upper: Vec<Vec3> = (0..5)
        .map(|k| Vec3::from_lat_lon(ring_lat, k as f64 * step))
        .collect();
    let lower: Vec<Vec3> = (0..5)
        .map(|k| Vec3::from_lat_lon(-ring_lat, (k as f64 + 0.5) * step))
        .collect();

    let mut faces = Vec::with_capacity(NUMBER_OF_FACES as usize);
    let mut push = |vertices: [Vec3; 3], tip_azimuth: f64| {
        let id = faces.len() as u8 + 1;
        faces.push(Face::new(id, vertices, tip_azimuth));
    };
    for k in 0..5 {
        push([top, upper[k], upper[(k + 1) % 5]], 0.0);
    }
    for k in 0..5 {
        push([upper[k], upper[(k + 1) % 5], lower[k]], PI);
    }
    for k in 0..5 {
        push([upper[k], lower[(k + 4) % 5], lower[k]], 0.0);
    }
    for k in 0..5 {
        push([lower[(k + 4) % 5], lower[k], bottom], PI);
    }
    faces
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::lattice::face_orientation;

    #[test]
    fn test_twenty_faces() {
        let faces = faces();
        assert_eq!(faces.len(), 20);
        for (i, face) in faces.iter().enumerate() {
            assert_eq!(face.id as usize, i + 1);
        }
    }

    #[test]
    fn test_faces_are_equilateral() {
        // adjacent icosahedron vertices are atan(2) apart
        let edge = 2.0_f64.atan();
        for face in faces() {
            let [a, b, c] = face.vertices;
            assert!((a.angle_to(&b) - edge).abs() < 1e-12);
            assert!((b.angle_to(&c) - edge).abs() < 1e-12);
            assert!((c.angle_to(&a) - edge).abs() < 1e-12);
        }
    }

    #[test]
    fn test_tip_is_due_north_or_south() {
        for face in faces() {
            let expected = if face.tip_azimuth == 0.0 { 1.0 } else { -1.0 };
            let tip = face
                .vertices
                .iter()
                .find(|v| v.dot(&face.east).abs() < 1e-12 && v.dot(&face.north) * expected > 0.0);
            assert!(tip.is_some(), "face {} has no tip", face.id);
        }
    }

    #[test]
    fn test_orientation_matches_face_ranges() {
        for face in faces() {
            let up = face.tip_azimuth == 0.0;
            assert_eq!(face_orientation(face.id) > 0.0, up);
        }
    }

    #[test]
    fn test_lat_lon_round_trip() {
        let v = Vec3::from_lat_lon(0.3, -2.1);
        let (lat, lon) = v.to_lat_lon();
        assert!((lat - 0.3).abs() < 1e-15);
        assert!((lon + 2.1).abs() < 1e-15);
    }
}
