//! HTTP server for the relay.
//!
//! Provides endpoints for:
//! - Chat relay (`POST <relay_path>`, default `/api/chat`)
//! - Health check (`/health`)
//! - Prometheus metrics (`/metrics`)

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

mod handlers;
pub mod responses;

/// Create the HTTP router with the relay mounted at `relay_path`.
///
/// A path without a leading `/` is mounted as if it had one.
pub fn create_router(state: Arc<AppState>, relay_path: &str) -> Router {
    let relay_path = normalize_path(relay_path);

    // The widget is served from the marketing site's origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // API routes
        .route(&relay_path, post(handlers::relay_chat))
        // Observability routes
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn normalize_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("/api/chat"), "/api/chat");
        assert_eq!(normalize_path("api/chat"), "/api/chat");
    }
}
