use crate::error::GridError;
use geo_types::{Geometry, GeometryCollection};
use geojson::GeoJson;
use std::str::FromStr;
use wkt::Wkt;

/// Parses a geometry string, auto-detecting WKT or GeoJSON format.
///
/// GeoJSON is detected by a leading `{`, everything else is tried as WKT.
///
/// # Example
/// ```
/// use isea3h_rs::{Isea3h, parse_geometry};
///
/// # fn main() -> Result<(), isea3h_rs::GridError> {
/// let grid = Isea3h::new(6)?;
/// let geometry = parse_geometry("LINESTRING(8.6 49.4, 8.8 49.5)")?;
/// let cells = grid.cells_for_geometry(geometry)?;
/// assert!(!cells.is_empty());
/// # Ok(())
/// # }
/// ```
pub fn parse_geometry(s: &str) -> Result<Geometry<f64>, GridError> {
    let trimmed = s.trim();
    if trimmed.starts_with('{') {
        parse_geojson(trimmed)
    } else {
        parse_wkt(trimmed)
    }
}

/// Parses GeoJSON into a `geo_types::Geometry`.
///
/// A feature gives its geometry. A feature collection gives a geometry collection
/// of its features' geometries in document order, so that
/// [`Isea3h::cells_for_geometry`](crate::Isea3h::cells_for_geometry) finds the
/// cells of every feature at once. Features without a geometry are skipped inside
/// a collection and rejected on their own.
pub fn parse_geojson(s: &str) -> Result<Geometry<f64>, GridError> {
    let geojson: GeoJson = s
        .parse()
        .map_err(|e: geojson::Error| GridError::GeometryParseError(e.to_string()))?;

    match geojson {
        GeoJson::Geometry(geom) => convert_geojson(geom),
        GeoJson::Feature(feat) => {
            let geom = feat.geometry.ok_or_else(|| {
                GridError::GeometryParseError("Feature has no geometry".to_string())
            })?;
            convert_geojson(geom)
        }
        GeoJson::FeatureCollection(collection) => {
            let members = collection
                .features
                .into_iter()
                .filter_map(|feat| feat.geometry)
                .map(convert_geojson)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Geometry::GeometryCollection(GeometryCollection(members)))
        }
    }
}

fn convert_geojson(geom: geojson::Geometry) -> Result<Geometry<f64>, GridError> {
    Geometry::try_from(geom).map_err(|e| GridError::GeometryParseError(e.to_string()))
}

/// Parses a WKT string into a `geo_types::Geometry`.
pub fn parse_wkt(s: &str) -> Result<Geometry<f64>, GridError> {
    let wkt: Wkt<f64> =
        Wkt::from_str(s).map_err(|e| GridError::GeometryParseError(e.to_string()))?;
    Geometry::try_from(wkt).map_err(|e| GridError::GeometryParseError(e.to_string()))
}
