use crate::coord::normalize_lon;
use crate::error::GridError;
use crate::index::constants::{MAX_RESOLUTION, SCALE_FACTOR};
use crate::index::{decode_cell_identifier, generate_cell_identifier, scale_degrees};
use geo_types::Point;
use geojson::feature::Id;
use geojson::{Feature, FeatureCollection, JsonObject};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// A single cell of the grid, identified by its resolution and geographic center.
///
/// Two cells are equal when they have the same resolution and their centers agree
/// to six decimal places of a degree, with longitudes wrapped into `[-180, 180)`
/// and longitude ignored at the poles. The same center computed on two adjacent
/// faces therefore collapses into one cell.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GridCell {
    pub resolution: u8,
    /// Center as `(lon, lat)` in degrees
    pub center: Point<f64>,
}

impl GridCell {
    /// Creates a cell, wrapping the center's longitude into `[-180, 180)`.
    pub fn new(resolution: u8, center: Point<f64>) -> Self {
        let lon = if center.y().abs() >= 90.0 {
            0.0
        } else {
            normalize_lon(center.x())
        };
        Self {
            resolution,
            center: Point::new(lon, center.y()),
        }
    }

    /// Create a GridCell from an encoded cell identifier
    ///
    /// # Example
    /// ```
    /// use isea3h_rs::{GridCell, Isea3h};
    ///
    /// # fn main() -> Result<(), isea3h_rs::GridError> {
    /// let grid = Isea3h::new(6)?;
    /// let cell = grid.cell_for_location(49.41, 8.69)?;
    /// let restored = GridCell::from_id(&cell.id())?;
    /// assert_eq!(cell, restored);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_id(id: &str) -> Result<Self, GridError> {
        let (_, resolution, lat, lon) = decode_cell_identifier(id)?;
        if resolution == 0 || resolution > MAX_RESOLUTION {
            return Err(GridError::InvalidResolution(resolution));
        }
        if lat.abs() > 90.0 || lon.abs() > 180.0 {
            return Err(GridError::InvalidCoordinate { lat, lon });
        }
        Ok(Self::new(resolution, Point::new(lon, lat)))
    }

    pub fn lat(&self) -> f64 {
        self.center.y()
    }

    pub fn lon(&self) -> f64 {
        self.center.x()
    }

    /// Identity key: resolution plus the center in millionths of a degree.
    fn key(&self) -> (u8, i32, i32) {
        let lat = scale_degrees(self.lat());
        let mut lon = scale_degrees(self.lon());
        // both ends of the antimeridian are the same meridian
        if lon == -180 * SCALE_FACTOR as i32 {
            lon = 180 * SCALE_FACTOR as i32;
        }
        if lat.abs() == 90 * SCALE_FACTOR as i32 {
            lon = 0;
        }
        (self.resolution, lat, lon)
    }

    /// URL-safe identifier of the cell, see [`generate_cell_identifier`].
    pub fn id(&self) -> String {
        let (resolution, lat, lon) = self.key();
        generate_cell_identifier(
            resolution,
            f64::from(lat) / SCALE_FACTOR,
            f64::from(lon) / SCALE_FACTOR,
        )
    }

    /// GeoJSON point feature of the cell center, with `id` and `resolution`
    /// properties.
    pub fn to_geojson_feature(&self) -> Feature {
        let id = self.id();
        let mut properties = JsonObject::new();
        properties.insert("id".to_string(), serde_json::Value::from(id.clone()));
        properties.insert(
            "resolution".to_string(),
            serde_json::Value::from(self.resolution),
        );

        Feature {
            bbox: None,
            geometry: Some(geojson::Geometry::new(geojson::Value::from(&self.center))),
            id: Some(Id::String(id)),
            properties: Some(properties),
            foreign_members: None,
        }
    }
}

impl PartialEq for GridCell {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for GridCell {}

impl Hash for GridCell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

/// Collects cells into a GeoJSON feature collection of their centers.
pub fn cells_to_feature_collection(cells: &[GridCell]) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: cells.iter().map(GridCell::to_geojson_feature).collect(),
        foreign_members: None,
    }
}
