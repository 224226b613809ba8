//! Atelier Core Domain Types
//!
//! This crate contains the types shared by the relay server and the chat
//! widget, with no dependencies on:
//! - HTTP clients or servers
//! - Runtime specifics
//!
//! The wire envelopes here are the contract between the widget and the relay.

pub mod chat;
pub mod error;
pub mod ids;
pub mod notices;
pub mod transcript;
pub mod wire;

// Re-export commonly used types
pub use chat::{ChatMessage, ChatRole};
pub use error::CoreError;
pub use ids::RequestId;
pub use transcript::Transcript;
pub use wire::{ChatRequest, ChatResponse};
