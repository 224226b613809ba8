//! Error types for the relay client.

use thiserror::Error;

/// Errors that can occur when calling the relay endpoint.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level HTTP failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Relay answered with a non-success status.
    #[error("relay returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body was not a relay envelope.
    #[error("serialization error: {0}")]
    Serialization(String),
}
