//! Cross-cutting error types for Atlas.
//!
//! Domain-specific errors (e.g., `StoreError`, `ParserError`) are defined in
//! their respective crates. The binary converges everything into `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any Atlas crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// A status transition was attempted that is not allowed.
    #[error("Invalid state transition: {entity_type} {id} from {from} to {to}")]
    InvalidTransition {
        entity_type: String,
        id: String,
        from: String,
        to: String,
    },

    /// Data failed validation (range, format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),
}

impl CoreError {
    /// Shorthand for a missing lore entry.
    #[must_use]
    pub fn entry_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "entry".to_string(),
            id: id.into(),
        }
    }
}
