//! Chat message types for the widget transcript and provider calls.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Role of a message in the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// User message (the visitor's question).
    User,
    /// Assistant message (the relayed reply or a fallback).
    Assistant,
    /// System message (the fixed persona instruction).
    System,
}

impl ChatRole {
    /// Wire name of the role, as the completion provider expects it.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
            ChatRole::System => "system",
        }
    }
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message in the conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of this message.
    pub role: ChatRole,
    /// Message content.
    pub content: String,
    /// Unix timestamp (milliseconds) when message was created.
    #[serde(default, skip_serializing)]
    pub timestamp_ms: i64,
}

impl ChatMessage {
    /// Create a new chat message.
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp_ms: chrono::Utc::now().timestamp_millis(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ChatRole::User, content)
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(ChatRole::Assistant, content)
    }

    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(ChatRole::System, content)
    }

    /// Compare role and content, ignoring the timestamp.
    pub fn same_as(&self, role: ChatRole, content: &str) -> bool {
        self.role == role && self.content == content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&ChatRole::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
    }

    #[test]
    fn test_message_wire_shape_omits_timestamp() {
        let msg = ChatMessage::system("be brief");
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value, serde_json::json!({"role": "system", "content": "be brief"}));
    }

    #[test]
    fn test_same_as_ignores_timestamp() {
        let mut msg = ChatMessage::user("hello");
        msg.timestamp_ms = 0;
        assert!(msg.same_as(ChatRole::User, "hello"));
        assert!(!msg.same_as(ChatRole::Assistant, "hello"));
    }
}
