//! Health and metrics handlers.

use std::sync::Arc;

use axum::{extract::State, http::header, response::IntoResponse, Json};

use crate::http::responses::HealthResponse;
use crate::state::AppState;

/// Health check endpoint.
///
/// Reports the provider variant and model, never whether a key is set.
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let config = state.relay.config();
    Json(HealthResponse {
        status: "ok",
        provider: config.variant.as_str(),
        model: config.model.clone(),
    })
}

/// Prometheus metrics endpoint.
pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let body = state.metrics.render();
    ([(header::CONTENT_TYPE, "text/plain; version=0.0.4")], body)
}
