//! Relay error taxonomy and its HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use atelier_core::{notices, ChatResponse};

/// Why a relay call did not produce a reply.
///
/// `Display` is for server logs only. The HTTP body is always one of the
/// fixed public messages in [`atelier_core::notices`].
#[derive(Debug, Error)]
pub enum RelayError {
    /// Request carried no usable `message`.
    #[error("no message provided")]
    Validation,

    /// Required configuration is missing.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Provider answered with a non-success status.
    #[error("provider returned HTTP {status}")]
    Upstream { status: u16 },

    /// Anything else: inbound body parse failure, network failure, or a
    /// malformed provider response.
    #[error("transport error: {detail}")]
    Transport {
        detail: String,
        public_message: &'static str,
    },
}

impl RelayError {
    pub fn transport(detail: impl Into<String>, public_message: &'static str) -> Self {
        Self::Transport {
            detail: detail.into(),
            public_message,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::Validation => StatusCode::BAD_REQUEST,
            RelayError::Configuration(_)
            | RelayError::Upstream { .. }
            | RelayError::Transport { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message returned to the caller.
    pub fn public_message(&self) -> &'static str {
        match self {
            RelayError::Validation => notices::NO_MESSAGE_PROVIDED,
            RelayError::Configuration(_) => notices::MISSING_API_KEY,
            RelayError::Upstream { .. } => notices::UPSTREAM_ERROR,
            RelayError::Transport { public_message, .. } => public_message,
        }
    }

    /// Metric label for this outcome.
    pub fn outcome(&self) -> &'static str {
        match self {
            RelayError::Validation => "validation_error",
            RelayError::Configuration(_) => "configuration_error",
            RelayError::Upstream { .. } => "upstream_error",
            RelayError::Transport { .. } => "transport_error",
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (
            self.status_code(),
            Json(ChatResponse::error(self.public_message())),
        )
            .into_response()
    }
}
