//! Core domain errors.

use thiserror::Error;

/// Core domain errors for Atelier.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A message with this role cannot be stored in a transcript.
    #[error("Role '{0}' is not allowed in a transcript")]
    InvalidRole(String),
}
