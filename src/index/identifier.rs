use crate::error::GridError;
use crate::index::constants::{IDENTIFIER_VERSION, SCALE_FACTOR};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

const IDENTIFIER_LENGTH: usize = 11;

/// Fixed-precision integer form of a degree value, as stored in identifiers.
pub(crate) fn scale_degrees(degrees: f64) -> i32 {
    (degrees * SCALE_FACTOR).round() as i32
}

/// Generates a cell identifier from a resolution and the cell center.
///
/// The identifier is a URL-safe Base64 string encoding an 11-byte binary structure.
///
/// # Binary Format
///
/// The identifier encodes the following data in big-endian byte order:
///
/// | Offset | Size | Field      | Description                                    |
/// |--------|------|------------|------------------------------------------------|
/// | 0      | 1    | Version    | Identifier format version (currently 1)        |
/// | 1      | 1    | Resolution | Grid resolution (1-30)                         |
/// | 2      | 4    | Latitude   | Latitude scaled by `SCALE_FACTOR` as `i32`     |
/// | 6      | 4    | Longitude  | Longitude scaled by `SCALE_FACTOR` as `i32`    |
/// | 10     | 1    | Checksum   | Wrapping sum of bytes 0-9 for validation       |
///
/// The caller is expected to pass the canonical center of a cell, so that equal
/// cells produce equal identifiers.
///
/// # Example
/// ```
/// use isea3h_rs::{decode_cell_identifier, generate_cell_identifier};
///
/// let id = generate_cell_identifier(5, 49.41, 8.69);
/// let (version, resolution, lat, lon) = decode_cell_identifier(&id).unwrap();
/// assert_eq!((version, resolution), (1, 5));
/// assert!((lat - 49.41).abs() < 1e-6);
/// assert!((lon - 8.69).abs() < 1e-6);
/// ```
pub fn generate_cell_identifier(resolution: u8, lat: f64, lon: f64) -> String {
    let mut binary_data = Vec::with_capacity(IDENTIFIER_LENGTH);
    binary_data.push(IDENTIFIER_VERSION);
    binary_data.push(resolution);
    binary_data.extend_from_slice(&scale_degrees(lat).to_be_bytes());
    binary_data.extend_from_slice(&scale_degrees(lon).to_be_bytes());

    let checksum: u8 = binary_data.iter().fold(0u8, |acc, &b| acc.wrapping_add(b));
    binary_data.push(checksum);

    URL_SAFE_NO_PAD.encode(&binary_data)
}

/// Decodes a cell identifier into `(version, resolution, lat, lon)`.
///
/// # Errors
///
/// - [`GridError::Base64DecodeError`] - Invalid Base64 encoding
/// - [`GridError::InvalidIdentifierLength`] - Decoded data is not 11 bytes
/// - [`GridError::InvalidChecksum`] - Checksum validation failed
/// - [`GridError::UnsupportedVersion`] - Version byte doesn't match current version
pub fn decode_cell_identifier(identifier: &str) -> Result<(u8, u8, f64, f64), GridError> {
    let binary_data = URL_SAFE_NO_PAD
        .decode(identifier)
        .map_err(|_| GridError::Base64DecodeError)?;

    if binary_data.len() != IDENTIFIER_LENGTH {
        return Err(GridError::InvalidIdentifierLength);
    }

    let (data, checksum_bytes) = binary_data.split_at(IDENTIFIER_LENGTH - 1);
    let calculated_checksum: u8 = data.iter().fold(0u8, |acc, &b| acc.wrapping_add(b));
    if calculated_checksum != checksum_bytes[0] {
        return Err(GridError::InvalidChecksum);
    }

    let version = data[0];
    if version != IDENTIFIER_VERSION {
        return Err(GridError::UnsupportedVersion(version));
    }
    let resolution = data[1];
    let lat_bytes: [u8; 4] = data[2..6]
        .try_into()
        .map_err(|_| GridError::InvalidIdentifierLength)?;
    let lon_bytes: [u8; 4] = data[6..10]
        .try_into()
        .map_err(|_| GridError::InvalidIdentifierLength)?;

    let lat = f64::from(i32::from_be_bytes(lat_bytes)) / SCALE_FACTOR;
    let lon = f64::from(i32::from_be_bytes(lon_bytes)) / SCALE_FACTOR;

    Ok((version, resolution, lat, lon))
}
