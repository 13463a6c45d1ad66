//! Catalog error types.

/// Errors that can occur while loading the dataset catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Report file could not be read
    #[error("failed to read catalog {path}: {message}")]
    Io { path: String, message: String },

    /// Report is not valid JSON, or not an object
    #[error("invalid catalog JSON: {0}")]
    Json(String),
}
