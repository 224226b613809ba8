//! Atelier chat widget.
//!
//! - [`ChatWidget`]: transcript, input buffer, visibility and the single
//!   in-flight relay slot.
//! - [`HttpRelayClient`]: the widget's connection to the relay endpoint.
//! - [`AssistantSignal`]: page-wide "open assistant" publish/subscribe.
//! - [`ui`]: ratatui rendering used by the `atelier-chat` binary.

pub mod client;
pub mod error;
pub mod signal;
pub mod suggestions;
pub mod ui;
pub mod widget;

pub use client::{HttpRelayClient, RelayTransport};
pub use error::ClientError;
pub use signal::{AssistantEvent, AssistantSignal, AssistantSubscription};
pub use suggestions::SUGGESTED_PROMPTS;
pub use widget::{ChatWidget, PendingSubmit, RelayOutcome, SubmitRejected};
