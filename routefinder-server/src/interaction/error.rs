//! Interaction error types.

/// Why an interaction produced no outcome.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InteractionError {
    /// A newer click started before this one finished
    #[error("interaction {id} superseded by a newer click")]
    Superseded { id: u64 },
}
