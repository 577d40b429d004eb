//! Cross-cutting error types for Ideate.
//!
//! Domain-specific errors (`DatabaseError`, `RelayError`, ...) live in their
//! respective crates. The HTTP surface maps all of them onto `ApiError`.

use thiserror::Error;

/// Errors that can be raised by any Ideate crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Data failed validation (missing required input, out-of-range value).
    #[error("Validation error: {0}")]
    Validation(String),

    /// A JSON payload could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
