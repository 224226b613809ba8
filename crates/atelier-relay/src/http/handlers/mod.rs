//! HTTP request handlers.

mod chat;
mod health;

pub use chat::relay_chat;
pub use health::{health_check, metrics_handler};
