use crate::coord::{FaceCoordinate, validate_lat_lon};
use crate::error::GridError;
use crate::index::constants::AUTHALIC_RADIUS;
use crate::index::lattice::{GridGeometry, LatticeIndex};
use crate::projection::IseaProjection;
use geo_types::Point;
use tracing::trace;

/// A geographic bounding box in degrees, with ordered corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLonBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl LatLonBounds {
    /// Builds a box from two latitudes and two longitudes given in any order.
    pub fn new(lat0: f64, lat1: f64, lon0: f64, lon1: f64) -> Result<Self, GridError> {
        validate_lat_lon(lat0, lon0)?;
        validate_lat_lon(lat1, lon1)?;
        Ok(Self {
            min_lat: lat0.min(lat1),
            max_lat: lat0.max(lat1),
            min_lon: lon0.min(lon1),
            max_lon: lon0.max(lon1),
        })
    }

    pub fn contains(&self, point: &Point<f64>) -> bool {
        (self.min_lat..=self.max_lat).contains(&point.y())
            && (self.min_lon..=self.max_lon).contains(&point.x())
    }

    /// Points along the four edges of the box, corners included, no more than
    /// `step` degrees apart.
    pub(crate) fn boundary_samples(&self, step: f64) -> Vec<Point<f64>> {
        let lat_span = self.max_lat - self.min_lat;
        let lon_span = self.max_lon - self.min_lon;
        let lat_steps = ((lat_span / step).ceil() as usize).max(1);
        let lon_steps = ((lon_span / step).ceil() as usize).max(1);

        let mut samples = Vec::with_capacity(2 * (lat_steps + lon_steps + 2));
        for i in 0..=lon_steps {
            let lon = self.min_lon + lon_span * i as f64 / lon_steps as f64;
            samples.push(Point::new(lon, self.min_lat));
            samples.push(Point::new(lon, self.max_lat));
        }
        for i in 0..=lat_steps {
            let lat = self.min_lat + lat_span * i as f64 / lat_steps as f64;
            samples.push(Point::new(self.min_lon, lat));
            samples.push(Point::new(self.max_lon, lat));
        }
        samples
    }
}

/// Range of lattice indices on one face that may hold cells of a bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceWindow {
    pub face: u8,
    pub min: LatticeIndex,
    pub max: LatticeIndex,
}

impl FaceWindow {
    /// Lattice centers of the window lying on the face's triangle.
    pub fn centers<'a>(
        &'a self,
        geometry: &'a GridGeometry,
    ) -> impl Iterator<Item = FaceCoordinate> + 'a {
        (self.min.column..=self.max.column)
            .flat_map(move |column| {
                (self.min.row..=self.max.row).map(move |row| LatticeIndex::new(column, row))
            })
            .map(move |index| geometry.center_of(self.face, index))
            .filter(move |center| geometry.contains(center))
    }
}

/// Spacing of the boundary samples in degrees: half a lattice spacing on the sphere.
pub(crate) fn sample_step(geometry: &GridGeometry) -> f64 {
    (geometry.spacing() / (2.0 * AUTHALIC_RADIUS)).to_degrees()
}

/// Computes the lattice window of a bounding box on one face, or `None` when the
/// box cannot touch the face.
///
/// `samples` are the box boundary samples for `step` (see
/// [`LatLonBounds::boundary_samples`]).
pub(crate) fn face_window(
    projection: &IseaProjection,
    geometry: &GridGeometry,
    bounds: &LatLonBounds,
    samples: &[Point<f64>],
    step: f64,
    face: u8,
) -> Result<Option<FaceWindow>, GridError> {
    let reach = projection.face_radius() + 2.0 * step.to_radians();

    let mut planar = Vec::new();
    for sample in samples {
        if projection.angle_to_face_center(face, sample)? <= reach {
            planar.push(projection.sphere_to_face_plane(face, sample)?);
        }
    }
    for vertex in projection.face_vertices(face)? {
        if bounds.contains(&vertex) {
            planar.push(projection.sphere_to_face_plane(face, &vertex)?);
        }
    }
    if planar.is_empty() {
        trace!(face, "no part of the bound is near the face");
        return Ok(None);
    }

    let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
    for fc in &planar {
        min_x = min_x.min(fc.x);
        max_x = max_x.max(fc.x);
        min_y = min_y.min(fc.y);
        max_y = max_y.max(fc.y);
    }

    let (extent_x, extent_y) = geometry.face_extent();
    let buffer = geometry.spacing();
    if min_x - buffer > extent_x
        || max_x + buffer < -extent_x
        || min_y - buffer > extent_y
        || max_y + buffer < -extent_y
    {
        trace!(face, "bound misses the face extent");
        return Ok(None);
    }
    let min_x = min_x.max(-extent_x - buffer);
    let max_x = max_x.min(extent_x + buffer);
    let min_y = min_y.max(-extent_y - buffer);
    let max_y = max_y.min(extent_y + buffer);

    let lower = geometry.index_of(&geometry.snap(&FaceCoordinate::new(face, min_x, min_y)));
    let upper = geometry.index_of(&geometry.snap(&FaceCoordinate::new(face, max_x, max_y)));

    Ok(Some(FaceWindow {
        face,
        min: LatticeIndex::new(
            lower.column.min(upper.column) - 1,
            lower.row.min(upper.row) - 1,
        ),
        max: LatticeIndex::new(
            lower.column.max(upper.column) + 1,
            lower.row.max(upper.row) + 1,
        ),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_accept_any_order() -> Result<(), GridError> {
        let a = LatLonBounds::new(10.0, -5.0, 40.0, 30.0)?;
        let b = LatLonBounds::new(-5.0, 10.0, 30.0, 40.0)?;
        assert_eq!(a, b);
        assert_eq!(a.min_lat, -5.0);
        assert_eq!(a.max_lon, 40.0);
        Ok(())
    }

    #[test]
    fn test_bounds_reject_invalid_coordinates() {
        assert!(matches!(
            LatLonBounds::new(0.0, 91.0, 0.0, 1.0),
            Err(GridError::InvalidCoordinate { .. })
        ));
        assert!(LatLonBounds::new(0.0, 1.0, f64::NAN, 1.0).is_err());
    }

    #[test]
    fn test_bounds_contains() -> Result<(), GridError> {
        let bounds = LatLonBounds::new(0.0, 10.0, 0.0, 10.0)?;
        assert!(bounds.contains(&Point::new(5.0, 5.0)));
        assert!(bounds.contains(&Point::new(10.0, 0.0)));
        assert!(!bounds.contains(&Point::new(10.1, 5.0)));
        Ok(())
    }

    #[test]
    fn test_boundary_samples() -> Result<(), GridError> {
        let bounds = LatLonBounds::new(0.0, 10.0, 0.0, 20.0)?;
        let samples = bounds.boundary_samples(5.0);
        // 5 longitudes and 3 latitudes, each on two edges
        assert_eq!(samples.len(), 2 * (5 + 3));
        assert!(samples.contains(&Point::new(0.0, 0.0)));
        assert!(samples.contains(&Point::new(20.0, 10.0)));
        assert!(samples.iter().all(|p| bounds.contains(p)));
        Ok(())
    }

    #[test]
    fn test_degenerate_bounds_sample_corners() -> Result<(), GridError> {
        let bounds = LatLonBounds::new(3.0, 3.0, 4.0, 4.0)?;
        let samples = bounds.boundary_samples(1.0);
        assert!(samples.iter().all(|p| *p == Point::new(4.0, 3.0)));
        Ok(())
    }

    #[test]
    fn test_face_window_rejects_far_faces() -> Result<(), GridError> {
        let projection = IseaProjection::symmetric_equator();
        let geometry = GridGeometry::new(4, projection.length_of_triangle_base())?;
        let bounds = LatLonBounds::new(49.0, 50.0, 8.0, 9.0)?;
        let step = sample_step(&geometry);
        let samples = bounds.boundary_samples(step);

        let home = projection.sphere_to_icosahedron(&Point::new(8.5, 49.5))?.face;
        let mut windows = 0;
        for face in 1..=20 {
            if let Some(window) = face_window(&projection, &geometry, &bounds, &samples, step, face)? {
                assert!(window.min.column <= window.max.column);
                assert!(window.min.row <= window.max.row);
                windows += 1;
            } else {
                assert_ne!(face, home);
            }
        }
        assert!(windows >= 1 && windows < 20);
        Ok(())
    }

    #[test]
    fn test_face_window_reports_projection_failure() -> Result<(), GridError> {
        let projection = IseaProjection::with_tilt(f64::NAN);
        let geometry = GridGeometry::new(4, projection.length_of_triangle_base())?;
        let bounds = LatLonBounds::new(49.0, 50.0, 8.0, 9.0)?;
        let step = sample_step(&geometry);
        let samples = bounds.boundary_samples(step);

        for face in 1..=20 {
            let result = face_window(&projection, &geometry, &bounds, &samples, step, face);
            assert!(
                matches!(result, Err(GridError::ProjectionError(_))),
                "face {face}: {result:?}"
            );
        }
        Ok(())
    }

    #[test]
    fn test_window_centers_lie_on_face() -> Result<(), GridError> {
        let projection = IseaProjection::symmetric_equator();
        let geometry = GridGeometry::new(2, projection.length_of_triangle_base())?;
        let window = FaceWindow {
            face: 3,
            min: LatticeIndex::new(-10, -10),
            max: LatticeIndex::new(10, 10),
        };
        let centers: Vec<FaceCoordinate> = window.centers(&geometry).collect();
        assert!(!centers.is_empty());
        assert!(centers.iter().all(|c| geometry.contains(c)));
        Ok(())
    }
}
