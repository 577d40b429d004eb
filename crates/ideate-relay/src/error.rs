//! Relay error types.

use thiserror::Error;

/// Errors from calls to the external workflow engine or inference endpoint.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Transport failure: connect, timeout, TLS, or body read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The upstream answered with a non-success status.
    #[error("upstream error ({status}): {body}")]
    Upstream {
        /// HTTP status code returned upstream.
        status: u16,
        /// Response body, verbatim.
        body: String,
    },

    /// A success response whose body could not be understood.
    #[error("parse error: {0}")]
    Parse(String),
}
