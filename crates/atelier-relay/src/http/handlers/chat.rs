//! Chat relay handler.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use tracing::{info, warn};

use atelier_core::{ChatRequest, ChatResponse, RequestId};

use crate::error::RelayError;
use crate::relay::RelayReply;
use crate::state::AppState;

/// POST <relay_path> - Relay one utterance to the completion provider.
///
/// The body is parsed as JSON whatever its content type, so that a missing
/// or non-string `message` is a 400, while an unparseable body is a generic
/// 500.
pub async fn relay_chat(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let request_id = RequestId::generate();

    match handle(&state, &request_id, body).await {
        Ok(reply) => {
            state.metrics.record_success(reply.fallback);
            (StatusCode::OK, Json(ChatResponse::reply(reply.text))).into_response()
        }
        Err(e) => {
            state.metrics.record_error(&e);
            info!(
                request_id = %request_id,
                outcome = e.outcome(),
                status = %e.status_code(),
                "Relay request rejected"
            );
            e.into_response()
        }
    }
}

async fn handle(
    state: &AppState,
    request_id: &RequestId,
    body: Bytes,
) -> Result<RelayReply, RelayError> {
    let body: Value = serde_json::from_slice(&body).map_err(|e| {
        warn!(request_id = %request_id, error = %e, "Invalid JSON in request body");
        RelayError::transport(e.to_string(), state.relay.config().server_error_message)
    })?;

    let utterance = ChatRequest::extract(&body).ok_or(RelayError::Validation)?;

    info!(request_id = %request_id, chars = utterance.len(), "Received chat message");

    state.relay.reply(request_id, utterance).await
}
