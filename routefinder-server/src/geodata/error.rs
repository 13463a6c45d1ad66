//! Dataset loading error types.

use crate::domain::FeatureKind;

/// Errors that can occur while fetching or decoding a dataset.
#[derive(Debug, thiserror::Error)]
pub enum GeoDataError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Remote returned a non-success status
    #[error("failed to fetch {location}: HTTP {status}")]
    Status { location: String, status: u16 },

    /// Local file could not be read
    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },

    /// Neither FlatGeobuf nor GeoJSON
    #[error("unsupported dataset format: {0}")]
    UnsupportedFormat(String),

    /// Bytes could not be decoded in the detected format
    #[error("{format} decode error: {message}")]
    Decode {
        format: &'static str,
        message: String,
    },

    /// Dataset holds geometries of the wrong kind
    #[error("expected {expected} geometries, found {}", found.join(", "))]
    GeometryMismatch {
        expected: FeatureKind,
        found: Vec<String>,
    },

    /// Dataset decoded to zero features
    #[error("no features found in {0}")]
    Empty(String),
}
