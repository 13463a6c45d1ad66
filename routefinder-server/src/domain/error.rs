//! Domain error types.
//!
//! These errors represent validation failures in the domain layer.
//! They are distinct from API/IO errors.

/// Domain-level validation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Coordinate outside WGS84 bounds or not finite
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(&'static str),
}
