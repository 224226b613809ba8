//! HTTP client for the relay endpoint.

use async_trait::async_trait;
use tracing::debug;

use atelier_core::{ChatRequest, ChatResponse};

use crate::error::ClientError;

/// Something that can deliver one utterance to the relay.
///
/// The widget only depends on this trait, so tests and alternative front ends
/// can swap the transport.
#[async_trait]
pub trait RelayTransport: Send + Sync {
    /// Send one request. Non-success statuses are errors.
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, ClientError>;
}

/// HTTP client for the relay's JSON endpoint.
pub struct HttpRelayClient {
    inner: reqwest::Client,
    base_url: String,
    url: String,
}

impl HttpRelayClient {
    /// Create a new client for `base_url` with the relay mounted at `path`.
    pub fn new(base_url: &str, path: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };
        Self {
            inner: reqwest::Client::new(),
            url: format!("{base_url}{path}"),
            base_url,
        }
    }

    /// Full relay endpoint URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Check if the relay is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let url = format!("{}/health", self.base_url);
        debug!(url = %url, "Checking health");

        let response = self.inner.get(&url).send().await?;
        Ok(response.status().is_success())
    }
}

#[async_trait]
impl RelayTransport for HttpRelayClient {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, ClientError> {
        debug!(url = %self.url, "POST relay request");

        let response = self.inner.post(&self.url).json(request).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            // Keep the relay's generic message for logs; the widget never shows it
            let message = serde_json::from_slice::<ChatResponse>(&bytes)
                .ok()
                .and_then(|r| match r {
                    ChatResponse::Error { error } => Some(error),
                    ChatResponse::Reply { .. } => None,
                })
                .unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_slice(&bytes).map_err(|e| ClientError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use httpmock::Method::POST;
    use httpmock::MockServer;
    use serde_json::json;

    #[test]
    fn test_url_joining() {
        let client = HttpRelayClient::new("http://localhost:3000/", "api/chat");
        assert_eq!(client.url(), "http://localhost:3000/api/chat");
    }

    #[tokio::test]
    async fn test_send_decodes_reply() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/chat")
                    .json_body(json!({"message": "Who are the founders?"}));
                then.status(200)
                    .json_body(json!({"reply": "Uday Sood and Vishal Baibhav Panda."}));
            })
            .await;

        let client = HttpRelayClient::new(&server.base_url(), "/api/chat");
        let response = client
            .send(&ChatRequest::new("Who are the founders?"))
            .await
            .unwrap();

        assert_eq!(
            response.reply_text(),
            Some("Uday Sood and Vishal Baibhav Panda.")
        );
        mock.assert_calls(1);
    }

    #[tokio::test]
    async fn test_send_maps_error_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/chat");
                then.status(500)
                    .json_body(json!({"error": "AI API error, please try again later."}));
            })
            .await;

        let client = HttpRelayClient::new(&server.base_url(), "/api/chat");
        let err = client.send(&ChatRequest::new("hi")).await.unwrap_err();

        match err {
            ClientError::Status { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "AI API error, please try again later.");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
