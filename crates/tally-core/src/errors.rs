//! Cross-cutting error types for Tally.
//!
//! Storage errors (`StoreError`) and configuration errors (`ConfigError`) are
//! defined in their respective crates. The binary converges everything into
//! `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any Tally crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Data failed validation (missing content, out-of-range values).
    #[error("Validation error: {0}")]
    Validation(String),

    /// A period or date string could not be parsed.
    #[error("Invalid period '{input}': {reason}")]
    InvalidPeriod { input: String, reason: String },

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
