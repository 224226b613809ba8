//! HTTP response types.
//!
//! The relay envelopes themselves (`ChatRequest` / `ChatResponse`) live in
//! `atelier_core::wire` because the widget decodes them too.

use serde::Serialize;

/// Response body for the health endpoint.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,

    /// Provider variant name (`studio` or `assistant`).
    pub provider: &'static str,

    /// Model identifier sent to the provider.
    pub model: String,
}
