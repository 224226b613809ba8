//! The relay service: one utterance in, one provider call, one reply out.

use std::sync::Arc;

use tracing::{error, info, warn};

use atelier_core::{notices, ChatMessage, RequestId};

use crate::config::ProviderConfig;
use crate::error::RelayError;
use crate::provider::{CompletionProvider, OpenAiCompatibleProvider, ProviderError};

/// Successful relay result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayReply {
    /// Text for the `reply` field.
    pub text: String,
    /// Whether `text` is the fixed fallback rather than provider output.
    pub fallback: bool,
}

/// Stateless relay over one configured provider.
///
/// Every call sends exactly the system instruction followed by the user's
/// utterance. No history is replayed.
pub struct Relay {
    config: ProviderConfig,
    provider: Arc<dyn CompletionProvider>,
}

impl Relay {
    pub fn new(config: ProviderConfig, provider: Arc<dyn CompletionProvider>) -> Self {
        Self { config, provider }
    }

    /// Relay backed by the OpenAI-compatible HTTP provider.
    pub fn from_config(config: ProviderConfig) -> Self {
        let provider = Arc::new(OpenAiCompatibleProvider::new(&config));
        Self::new(config, provider)
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// The two messages sent for `utterance`.
    pub fn build_messages(&self, utterance: &str) -> [ChatMessage; 2] {
        [
            ChatMessage::system(self.config.system_prompt.as_str()),
            ChatMessage::user(utterance),
        ]
    }

    /// Forward `utterance` to the provider.
    pub async fn reply(
        &self,
        request_id: &RequestId,
        utterance: &str,
    ) -> Result<RelayReply, RelayError> {
        if utterance.is_empty() {
            return Err(RelayError::Validation);
        }

        if !self.config.has_api_key() {
            error!(
                request_id = %request_id,
                variable = self.config.variant.api_key_var(),
                "Provider API key is not configured"
            );
            return Err(RelayError::Configuration(format!(
                "{} is not set",
                self.config.variant.api_key_var()
            )));
        }

        let messages = self.build_messages(utterance);

        match self.provider.complete(&messages).await {
            Ok(Some(text)) => {
                info!(request_id = %request_id, chars = text.len(), "Relayed provider reply");
                Ok(RelayReply {
                    text,
                    fallback: false,
                })
            }
            Ok(None) => {
                warn!(request_id = %request_id, "Provider returned no content, using fallback reply");
                Ok(RelayReply {
                    text: notices::RELAY_EMPTY_REPLY.to_string(),
                    fallback: true,
                })
            }
            Err(ProviderError::Status { status, body }) => {
                warn!(
                    request_id = %request_id,
                    status = %status,
                    body = %body,
                    "Provider returned an error status"
                );
                Err(RelayError::Upstream {
                    status: status.as_u16(),
                })
            }
            Err(e) => {
                error!(request_id = %request_id, error = %e, "Provider call failed");
                Err(RelayError::transport(
                    e.to_string(),
                    self.config.server_error_message,
                ))
            }
        }
    }
}
