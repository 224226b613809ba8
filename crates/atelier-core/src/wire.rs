//! JSON envelopes exchanged between the chat widget and the relay endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body for the relay endpoint: one utterance, never the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Pull the utterance out of an arbitrary JSON body.
    ///
    /// Returns `None` when `message` is missing, is not a string, or is the
    /// empty string.
    pub fn extract(body: &Value) -> Option<&str> {
        body.get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
    }
}

/// Response body of the relay endpoint.
///
/// Untagged so one type decodes both the success and the error envelope.
/// `Error` is listed first: a body carrying `error` must never be read as a
/// reply with a missing field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatResponse {
    Error {
        error: String,
    },
    Reply {
        #[serde(default)]
        reply: Option<String>,
    },
}

impl ChatResponse {
    pub fn reply(text: impl Into<String>) -> Self {
        Self::Reply {
            reply: Some(text.into()),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            error: message.into(),
        }
    }

    /// The reply text, if this is a success envelope with a non-empty reply.
    pub fn reply_text(&self) -> Option<&str> {
        match self {
            ChatResponse::Reply { reply } => reply.as_deref().filter(|r| !r.is_empty()),
            ChatResponse::Error { .. } => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ChatResponse::Error { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_rejects_missing_and_empty() {
        assert_eq!(ChatRequest::extract(&json!({})), None);
        assert_eq!(ChatRequest::extract(&json!({"message": ""})), None);
        assert_eq!(ChatRequest::extract(&json!({"message": 42})), None);
        assert_eq!(ChatRequest::extract(&json!({"message": null})), None);
        assert_eq!(ChatRequest::extract(&json!([1, 2])), None);
    }

    #[test]
    fn test_extract_accepts_text() {
        let body = json!({"message": "Who are the founders?"});
        assert_eq!(ChatRequest::extract(&body), Some("Who are the founders?"));
    }

    #[test]
    fn test_response_envelopes() {
        let ok = serde_json::to_value(ChatResponse::reply("hi")).unwrap();
        assert_eq!(ok, json!({"reply": "hi"}));

        let err = serde_json::to_value(ChatResponse::error("No message provided")).unwrap();
        assert_eq!(err, json!({"error": "No message provided"}));
    }

    #[test]
    fn test_decode_prefers_error_envelope() {
        let decoded: ChatResponse = serde_json::from_str(r#"{"error":"boom"}"#).unwrap();
        assert!(decoded.is_error());
        assert_eq!(decoded.reply_text(), None);
    }

    #[test]
    fn test_decode_missing_reply() {
        let decoded: ChatResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(decoded, ChatResponse::Reply { reply: None });
        assert_eq!(decoded.reply_text(), None);

        let empty: ChatResponse = serde_json::from_str(r#"{"reply":""}"#).unwrap();
        assert_eq!(empty.reply_text(), None);
    }
}
