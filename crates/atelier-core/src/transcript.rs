//! Append-only conversation transcript held by the chat widget.

use crate::chat::{ChatMessage, ChatRole};
use crate::error::CoreError;

/// Ordered user/assistant messages for one session.
///
/// Messages are never removed or reordered, and the transcript is never
/// persisted. Position is the only identity a message has.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message. System messages are rejected.
    pub fn push(&mut self, message: ChatMessage) -> Result<(), CoreError> {
        if message.role == ChatRole::System {
            return Err(CoreError::InvalidRole(message.role.to_string()));
        }
        self.messages.push(message);
        Ok(())
    }

    /// Append a user message.
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::user(content));
    }

    /// Append an assistant message.
    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::assistant(content));
    }

    /// All messages in order.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// The most recent message, if any.
    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Number of messages with the given role.
    pub fn count(&self, role: ChatRole) -> usize {
        self.messages.iter().filter(|m| m.role == role).count()
    }
}
