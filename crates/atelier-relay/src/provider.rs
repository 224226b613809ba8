//! Completion provider seam and its OpenAI-compatible HTTP implementation.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use atelier_core::ChatMessage;

use crate::config::ProviderConfig;

/// Failure talking to a completion provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Provider answered with a non-success status.
    #[error("provider returned {status}")]
    Status { status: StatusCode, body: String },

    /// Request never completed (connect, TLS, body read).
    #[error("provider request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body was not a completion object.
    #[error("malformed provider response: {0}")]
    Decode(String),
}

/// A hosted chat-completion API.
///
/// Implementors own transport, authentication and serialization. The relay
/// decides which messages go out; a provider sends exactly what it is given.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Send `messages` and return the first choice's content, or `None` when
    /// the provider produced no usable content.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<Option<String>, ProviderError>;
}

#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: Vec<ApiMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Serialize)]
struct ApiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// HTTP client for `/chat/completions` style APIs (OpenAI, OpenRouter and
/// compatible servers).
///
/// No retry, no streaming, and no timeout beyond reqwest's defaults.
pub struct OpenAiCompatibleProvider {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
    model: String,
    temperature: Option<f32>,
    referer: Option<String>,
    title: Option<String>,
}

impl OpenAiCompatibleProvider {
    pub fn new(config: &ProviderConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Build with a shared reqwest client.
    pub fn with_client(client: reqwest::Client, config: &ProviderConfig) -> Self {
        Self {
            client,
            url: config.completions_url(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            referer: config.referer.clone(),
            title: config.title.clone(),
        }
    }

    /// First choice's content; empty strings count as absent.
    fn first_content(response: ApiResponse) -> Option<String> {
        response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .filter(|c| !c.is_empty())
    }
}

#[async_trait]
impl CompletionProvider for OpenAiCompatibleProvider {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<Option<String>, ProviderError> {
        let request = ApiRequest {
            model: &self.model,
            messages: messages
                .iter()
                .map(|m| ApiMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            temperature: self.temperature,
        };

        debug!(url = %self.url, model = %self.model, "Calling completion provider");

        let mut builder = self.client.post(&self.url).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }
        if let Some(referer) = &self.referer {
            builder = builder.header("HTTP-Referer", referer);
        }
        if let Some(title) = &self.title {
            builder = builder.header("X-Title", title);
        }

        let response = builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status { status, body });
        }

        let bytes = response.bytes().await?;
        let parsed: ApiResponse =
            serde_json::from_slice(&bytes).map_err(|e| ProviderError::Decode(e.to_string()))?;

        Ok(Self::first_content(parsed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Option<String> {
        let response: ApiResponse = serde_json::from_str(json).unwrap();
        OpenAiCompatibleProvider::first_content(response)
    }

    #[test]
    fn test_first_content_takes_first_choice() {
        let json = r#"{"choices":[{"message":{"content":"first"}},{"message":{"content":"second"}}]}"#;
        assert_eq!(parse(json).as_deref(), Some("first"));
    }

    #[test]
    fn test_first_content_missing_pieces() {
        assert_eq!(parse(r#"{"choices":[]}"#), None);
        assert_eq!(parse(r#"{}"#), None);
        assert_eq!(parse(r#"{"choices":[{}]}"#), None);
        assert_eq!(parse(r#"{"choices":[{"message":{"content":null}}]}"#), None);
        assert_eq!(parse(r#"{"choices":[{"message":{"content":""}}]}"#), None);
    }

    #[test]
    fn test_request_omits_missing_temperature() {
        let request = ApiRequest {
            model: "m",
            messages: vec![ApiMessage {
                role: "user",
                content: "hi",
            }],
            temperature: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("temperature").is_none());
    }
}
