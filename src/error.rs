use thiserror::Error;

/// Broad category of a [`GridError`], for callers that branch on the kind of failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The grid could not be configured.
    Configuration,
    /// A coordinate or geometry could not be mapped onto the grid.
    Mapping,
    /// A cell identifier could not be decoded.
    Identifier,
    /// A geometry string could not be parsed.
    Parse,
}

/// Error type for isea3h-rs operations.
#[derive(Debug, Error, PartialEq)]
pub enum GridError {
    /// The resolution is outside the valid range (1-30).
    #[error("Invalid resolution: {0}")]
    InvalidResolution(u8),
    /// The grid builder was finished without a resolution.
    #[error("Resolution must be set")]
    MissingResolution,
    /// Latitude/longitude are not finite or out of range.
    #[error("Invalid coordinate: lat {lat}, lon {lon}")]
    InvalidCoordinate { lat: f64, lon: f64 },
    /// The face id is not one of the 20 icosahedron faces.
    #[error("Invalid face: {0}")]
    InvalidFace(u8),
    /// The projection could not map the point.
    #[error("Projection error: {0}")]
    ProjectionError(String),
    /// The geometry has no centroid (e.g. it is empty).
    #[error("Geometry has no centroid")]
    DegenerateGeometry,
    /// The cell identifier has an invalid length.
    #[error("Invalid identifier length")]
    InvalidIdentifierLength,
    /// The cell identifier checksum validation failed.
    #[error("Invalid checksum")]
    InvalidChecksum,
    /// The identifier version is not supported.
    #[error("Unsupported version: {0}")]
    UnsupportedVersion(u8),
    /// Failed to decode Base64 identifier.
    #[error("Base64 decode error")]
    Base64DecodeError,
    /// Failed to parse geometry from string (GeoJSON or WKT).
    #[error("Geometry parse error: {0}")]
    GeometryParseError(String),
}

impl GridError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GridError::InvalidResolution(_) | GridError::MissingResolution => {
                ErrorKind::Configuration
            }
            GridError::InvalidCoordinate { .. }
            | GridError::InvalidFace(_)
            | GridError::ProjectionError(_)
            | GridError::DegenerateGeometry => ErrorKind::Mapping,
            GridError::InvalidIdentifierLength
            | GridError::InvalidChecksum
            | GridError::UnsupportedVersion(_)
            | GridError::Base64DecodeError => ErrorKind::Identifier,
            GridError::GeometryParseError(_) => ErrorKind::Parse,
        }
    }
}
