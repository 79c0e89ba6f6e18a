use crate::coord::{FaceCoordinate, normalize_lon, validate_lat_lon};
use crate::error::GridError;
use crate::index::constants::{AUTHALIC_RADIUS, NUMBER_OF_FACES};
use crate::projection::icosahedron::{Face, Vec3, faces};
use geo_types::Point;
use std::f64::consts::PI;

const ONE_THIRD_TURN: f64 = 2.0 * PI / 3.0;
const MAX_ITERATIONS: usize = 100;

/// Icosahedral Snyder equal-area (ISEA) projection.
///
/// Maps the sphere onto the planes of the 20 icosahedron faces and back. Within a
/// face the mapping is Snyder's equal-area transform; outside of it the same
/// formulas are extended, which is what lets a face plane see points of its
/// neighbours.
///
/// The projection is immutable and can be shared between threads.
///
/// # Example
///
/// ```
/// use isea3h_rs::IseaProjection;
/// use geo_types::Point;
///
/// # fn main() -> Result<(), isea3h_rs::GridError> {
/// let projection = IseaProjection::symmetric_equator();
/// let heidelberg = Point::new(8.69, 49.41);
/// let fc = projection.sphere_to_icosahedron(&heidelberg)?;
/// let back = projection.icosahedron_to_sphere(&fc)?;
/// assert!((back.x() - 8.69).abs() < 1e-9);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct IseaProjection {
    faces: Vec<Face>,
    radius: f64,
    sin_tilt: f64,
    cos_tilt: f64,
    // spherical distance from face center to vertex
    g: f64,
    tan_g: f64,
    cos_g: f64,
    big_g: f64,
    sin_big_g: f64,
    cos_big_g: f64,
    cot_theta: f64,
    // squared planar distance from face center to vertex on the unit sphere
    vertex_distance_sq: f64,
    vertex_distance: f64,
}

impl IseaProjection {
    /// Orientation with the poles on edge midpoints and the equator mapped symmetrically.
    ///
    /// The north pole lands on the midpoint of the edge between the frame's north
    /// vertex and the ring vertex at frame longitude 0.
    pub fn symmetric_equator() -> Self {
        let tilt = (PI / 2.0 - 0.5_f64.atan()) / 2.0;
        Self::with_tilt(tilt)
    }

    pub(crate) fn with_tilt(tilt: f64) -> Self {
        // angle at the vertex between edge and center line, spherical and planar
        let big_g = 36.0_f64.to_radians();
        let theta = 30.0_f64.to_radians();
        let cot_theta = 1.0 / theta.tan();
        let g = (theta.tan() / big_g.tan()).acos();
        // one third of a face keeps its spherical area pi/15 on the plane
        let vertex_distance_sq = 4.0 * PI / (15.0 * 3.0_f64.sqrt());

        Self {
            faces: faces(),
            radius: AUTHALIC_RADIUS,
            sin_tilt: tilt.sin(),
            cos_tilt: tilt.cos(),
            g,
            tan_g: g.tan(),
            cos_g: g.cos(),
            big_g,
            sin_big_g: big_g.sin(),
            cos_big_g: big_g.cos(),
            cot_theta,
            vertex_distance_sq,
            vertex_distance: vertex_distance_sq.sqrt(),
        }
    }

    /// Number of icosahedron faces.
    pub fn number_of_faces(&self) -> u8 {
        NUMBER_OF_FACES
    }

    /// Edge length of a face triangle on the plane, in metres.
    pub fn length_of_triangle_base(&self) -> f64 {
        3.0_f64.sqrt() * self.vertex_distance * self.radius
    }

    /// Spherical distance from a face center to its vertices, in radians.
    pub(crate) fn face_radius(&self) -> f64 {
        self.g
    }

    /// Projects a geographic point (lon/lat degrees) onto the face whose center is nearest.
    pub fn sphere_to_icosahedron(&self, point: &Point<f64>) -> Result<FaceCoordinate, GridError> {
        let v = self.to_frame(point)?;
        let mut best = &self.faces[0];
        let mut best_dot = f64::NEG_INFINITY;
        for face in &self.faces {
            let d = face.center.dot(&v);
            if d > best_dot {
                best_dot = d;
                best = face;
            }
        }
        self.forward(best, &v)
    }

    /// Projects a geographic point onto the plane of the given face, even if the
    /// point lies outside that face.
    pub fn sphere_to_face_plane(
        &self,
        face: u8,
        point: &Point<f64>,
    ) -> Result<FaceCoordinate, GridError> {
        let face = self.face(face)?;
        let v = self.to_frame(point)?;
        self.forward(face, &v)
    }

    /// Maps a face coordinate back to a geographic point (lon/lat degrees).
    pub fn icosahedron_to_sphere(&self, fc: &FaceCoordinate) -> Result<Point<f64>, GridError> {
        let face = self.face(fc.face)?;
        let v = self.inverse(face, fc.x, fc.y)?;
        Ok(self.from_frame(v))
    }

    /// Spherical angle between a geographic point and the center of a face, in radians.
    pub(crate) fn angle_to_face_center(
        &self,
        face: u8,
        point: &Point<f64>,
    ) -> Result<f64, GridError> {
        let face = self.face(face)?;
        let v = self.to_frame(point)?;
        let angle = face.center.angle_to(&v);
        if !angle.is_finite() {
            return Err(GridError::ProjectionError(format!(
                "no angle between ({}, {}) and the center of face {}",
                point.x(),
                point.y(),
                face.id
            )));
        }
        Ok(angle)
    }

    /// Geographic center of a face.
    pub fn face_center(&self, face: u8) -> Result<Point<f64>, GridError> {
        Ok(self.from_frame(self.face(face)?.center))
    }

    /// Geographic vertices of a face.
    pub fn face_vertices(&self, face: u8) -> Result<[Point<f64>; 3], GridError> {
        let face = self.face(face)?;
        Ok(face.vertices.map(|v| self.from_frame(v)))
    }

    fn face(&self, face: u8) -> Result<&Face, GridError> {
        if face == 0 || face > NUMBER_OF_FACES {
            return Err(GridError::InvalidFace(face));
        }
        Ok(&self.faces[face as usize - 1])
    }

    fn to_frame(&self, point: &Point<f64>) -> Result<Vec3, GridError> {
        validate_lat_lon(point.y(), point.x())?;
        let v = Vec3::from_lat_lon(point.y().to_radians(), point.x().to_radians());
        Ok(Vec3::new(
            v.x * self.cos_tilt + v.z * self.sin_tilt,
            v.y,
            -v.x * self.sin_tilt + v.z * self.cos_tilt,
        ))
    }

    fn from_frame(&self, v: Vec3) -> Point<f64> {
        let geo = Vec3::new(
            v.x * self.cos_tilt - v.z * self.sin_tilt,
            v.y,
            v.x * self.sin_tilt + v.z * self.cos_tilt,
        );
        let (lat, lon) = geo.to_lat_lon();
        let lat = lat.to_degrees();
        // longitude is meaningless at the poles
        let lon = if lat.abs() >= 90.0 {
            0.0
        } else {
            normalize_lon(lon.to_degrees())
        };
        Point::new(lon, lat)
    }

    /// Splits an azimuth into the third of the face it falls in and the remaining
    /// angle measured from that third's first vertex.
    fn reduce_azimuth(&self, azimuth: f64, face: &Face) -> (f64, f64) {
        let relative = (azimuth - face.tip_azimuth).rem_euclid(2.0 * PI);
        let third = (relative / ONE_THIRD_TURN).floor().min(2.0);
        (relative - third * ONE_THIRD_TURN, third)
    }

    fn edge_factor(&self, azimuth: f64) -> f64 {
        azimuth.cos() + azimuth.sin() * self.cot_theta
    }

    /// Spherical angle at the point on the edge, for an azimuth from the vertex.
    fn edge_angle(&self, azimuth: f64) -> f64 {
        (azimuth.sin() * self.sin_big_g * self.cos_g - azimuth.cos() * self.cos_big_g)
            .clamp(-1.0, 1.0)
            .acos()
    }

    fn forward(&self, face: &Face, v: &Vec3) -> Result<FaceCoordinate, GridError> {
        let z = face.center.angle_to(v);
        if z < 1e-15 {
            return Ok(FaceCoordinate::new(face.id, 0.0, 0.0));
        }
        let azimuth = v.dot(&face.east).atan2(v.dot(&face.north));
        let (az, third) = self.reduce_azimuth(azimuth, face);

        // spherical distance to the edge along this azimuth
        let q = (self.tan_g / self.edge_factor(az)).atan();
        let h = self.edge_angle(az);
        let area = az + self.big_g + h - PI;
        let az_plane = (2.0 * area).atan2(self.vertex_distance_sq - 2.0 * area * self.cot_theta);
        let edge_distance = self.vertex_distance / self.edge_factor(az_plane);
        let rho = edge_distance * (z / 2.0).sin() / (q / 2.0).sin() * self.radius;

        let angle = az_plane + third * ONE_THIRD_TURN + face.tip_azimuth;
        let (x, y) = (rho * angle.sin(), rho * angle.cos());
        if !x.is_finite() || !y.is_finite() {
            return Err(GridError::ProjectionError(format!(
                "({x}, {y}) on face {} is not a finite plane coordinate",
                face.id
            )));
        }
        Ok(FaceCoordinate::new(face.id, x, y))
    }

    fn inverse(&self, face: &Face, x: f64, y: f64) -> Result<Vec3, GridError> {
        let rho = x.hypot(y) / self.radius;
        if rho < 1e-15 {
            return Ok(face.center);
        }
        let (az_plane, third) = self.reduce_azimuth(x.atan2(y), face);
        let factor = self.edge_factor(az_plane);
        let edge_distance = self.vertex_distance / factor;
        let area = self.vertex_distance_sq * az_plane.sin() / (2.0 * factor);

        let az = self.solve_azimuth(area);
        let q = (self.tan_g / self.edge_factor(az)).atan();
        let s = rho * (q / 2.0).sin() / edge_distance;
        if !s.is_finite() || s > 1.0 + 1e-12 {
            return Err(GridError::ProjectionError(format!(
                "({x}, {y}) on face {} is beyond the reach of the inverse projection",
                face.id
            )));
        }
        let z = 2.0 * s.min(1.0).asin();

        let azimuth = az + third * ONE_THIRD_TURN + face.tip_azimuth;
        let direction = face.north.scale(azimuth.cos()) + face.east.scale(azimuth.sin());
        Ok(face.center.scale(z.cos()) + direction.scale(z.sin()))
    }

    /// Finds the spherical azimuth whose triangle center-vertex-edge has the given
    /// spherical excess. Newton steps, falling back to bisection when a step leaves
    /// the bracket.
    fn solve_azimuth(&self, area: f64) -> f64 {
        let (mut lo, mut hi) = (0.0, ONE_THIRD_TURN);
        let mut az = ONE_THIRD_TURN / 2.0;
        for _ in 0..MAX_ITERATIONS {
            let h = self.edge_angle(az);
            let value = az + self.big_g + h - PI - area;
            if value > 0.0 {
                hi = az;
            } else {
                lo = az;
            }
            let dh = -(az.cos() * self.sin_big_g * self.cos_g + az.sin() * self.cos_big_g) / h.sin();
            let slope = 1.0 + dh;
            let mut next = az - value / slope;
            if !next.is_finite() || next <= lo || next >= hi {
                next = (lo + hi) / 2.0;
            }
            if (next - az).abs() < 1e-15 {
                return next;
            }
            az = next;
        }
        az
    }
}

impl Default for IseaProjection {
    fn default() -> Self {
        Self::symmetric_equator()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projection() -> IseaProjection {
        IseaProjection::symmetric_equator()
    }

    #[test]
    fn test_number_of_faces() {
        assert_eq!(projection().number_of_faces(), 20);
    }

    #[test]
    fn test_length_of_triangle_base() {
        let l0 = projection().length_of_triangle_base();
        // about 7674 km on the authalic sphere
        assert!(l0 > 7_670_000.0 && l0 < 7_680_000.0, "{l0}");
    }

    #[test]
    fn test_face_radius() {
        assert!((projection().face_radius().to_degrees() - 37.377_368_14).abs() < 1e-6);
    }

    #[test]
    fn test_face_centers_map_to_origin() -> Result<(), GridError> {
        let projection = projection();
        for face in 1..=20 {
            let center = projection.face_center(face)?;
            let fc = projection.sphere_to_face_plane(face, &center)?;
            assert!(fc.x.abs() < 1e-6 && fc.y.abs() < 1e-6, "face {face}: {fc:?}");
            assert_eq!(projection.sphere_to_icosahedron(&center)?.face, face);
        }
        Ok(())
    }

    #[test]
    fn test_vertices_map_to_triangle_corners() -> Result<(), GridError> {
        let projection = projection();
        let l0 = projection.length_of_triangle_base();
        let tip = l0 / 3.0_f64.sqrt();
        for face in 1..=20 {
            for vertex in projection.face_vertices(face)? {
                let fc = projection.sphere_to_face_plane(face, &vertex)?;
                assert!((fc.x.hypot(fc.y) - tip).abs() < 1e-3, "face {face}: {fc:?}");
            }
        }
        Ok(())
    }

    #[test]
    fn test_poles_sit_on_a_shared_edge() -> Result<(), GridError> {
        let projection = projection();
        for pole in [Point::new(0.0, 90.0), Point::new(0.0, -90.0)] {
            let mut on_edge = 0;
            for face in 1..=20 {
                let fc = projection.sphere_to_face_plane(face, &pole)?;
                // edge midpoints sit at the inradius, half the circumradius
                let inradius = projection.length_of_triangle_base() / (2.0 * 3.0_f64.sqrt());
                if (fc.x.hypot(fc.y) - inradius).abs() < 1e-3 {
                    on_edge += 1;
                }
            }
            assert_eq!(on_edge, 2);
        }
        Ok(())
    }

    #[test]
    fn test_round_trip() -> Result<(), GridError> {
        let projection = projection();
        for &(lon, lat) in &[
            (8.69, 49.41),
            (-122.42, 37.77),
            (151.21, -33.87),
            (0.0, 0.0),
            (179.9, -12.0),
            (-45.0, 89.0),
        ] {
            let fc = projection.sphere_to_icosahedron(&Point::new(lon, lat))?;
            let back = projection.icosahedron_to_sphere(&fc)?;
            assert!((back.x() - lon).abs() < 1e-9, "{lon} -> {}", back.x());
            assert!((back.y() - lat).abs() < 1e-9, "{lat} -> {}", back.y());
        }
        Ok(())
    }

    #[test]
    fn test_equal_area_on_face() -> Result<(), GridError> {
        // doubling the spherical distance from the center of the face roughly
        // quadruples the enclosed area, so planar radius scales like sin(z/2)
        let projection = projection();
        let face = &projection.faces[0];
        let v1 = face.center.scale(0.01_f64.cos()) + face.north.scale(0.01_f64.sin());
        let v2 = face.center.scale(0.02_f64.cos()) + face.north.scale(0.02_f64.sin());
        let r1 = projection.forward(face, &v1)?.y;
        let r2 = projection.forward(face, &v2)?.y;
        assert!((r2 / r1 - (0.01_f64).sin() / (0.005_f64).sin()).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_shared_edge_points_agree() -> Result<(), GridError> {
        // faces 1 and 2 share the edge between the north vertex and a ring vertex
        let projection = projection();
        let shared: Vec<Vec3> = projection.faces[0]
            .vertices
            .iter()
            .filter(|v| projection.faces[1].vertices.contains(v))
            .copied()
            .collect();
        assert_eq!(shared.len(), 2);
        let mid = (shared[0].scale(0.3) + shared[1].scale(0.7)).normalize();
        let fc1 = projection.forward(&projection.faces[0], &mid)?;
        let fc2 = projection.forward(&projection.faces[1], &mid)?;
        let p1 = projection.from_frame(projection.inverse(&projection.faces[0], fc1.x, fc1.y)?);
        let p2 = projection.from_frame(projection.inverse(&projection.faces[1], fc2.x, fc2.y)?);
        assert!((p1.x() - p2.x()).abs() < 1e-9);
        assert!((p1.y() - p2.y()).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_invalid_face() {
        let projection = projection();
        assert!(matches!(
            projection.sphere_to_face_plane(0, &Point::new(0.0, 0.0)),
            Err(GridError::InvalidFace(0))
        ));
        assert!(matches!(
            projection.icosahedron_to_sphere(&FaceCoordinate::new(21, 0.0, 0.0)),
            Err(GridError::InvalidFace(21))
        ));
    }

    #[test]
    fn test_invalid_coordinate() {
        let result = projection().sphere_to_icosahedron(&Point::new(0.0, 95.0));
        assert!(matches!(result, Err(GridError::InvalidCoordinate { .. })));
    }

    #[test]
    fn test_non_finite_forward_is_an_error() {
        let projection = projection();
        let face = &projection.faces[4];
        let result = projection.forward(face, &Vec3::new(f64::NAN, 0.0, 0.0));
        assert!(matches!(result, Err(GridError::ProjectionError(_))));
    }

    #[test]
    fn test_broken_orientation_is_an_error() {
        let projection = IseaProjection::with_tilt(f64::NAN);
        let point = Point::new(8.69, 49.41);
        assert!(matches!(
            projection.sphere_to_icosahedron(&point),
            Err(GridError::ProjectionError(_))
        ));
        assert!(matches!(
            projection.angle_to_face_center(1, &point),
            Err(GridError::ProjectionError(_))
        ));
    }

    #[test]
    fn test_unreachable_plane_point() {
        let projection = projection();
        let far = 10.0 * projection.length_of_triangle_base();
        let result = projection.icosahedron_to_sphere(&FaceCoordinate::new(1, far, far));
        assert!(matches!(result, Err(GridError::ProjectionError(_))));
    }
}
