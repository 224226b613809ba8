//! Atelier Relay Library
//!
//! This crate provides the chat relay: provider configuration, the
//! completion provider seam, the stateless relay service, and the HTTP
//! surface the chat widget talks to.

pub mod config;
pub mod error;
pub mod http;
pub mod metrics;
pub mod provider;
pub mod relay;
pub mod state;

pub use config::{ProviderConfig, ProviderVariant, RelayConfig};
pub use error::RelayError;
pub use http::create_router;
pub use metrics::RelayMetrics;
pub use provider::{CompletionProvider, OpenAiCompatibleProvider, ProviderError};
pub use relay::{Relay, RelayReply};
pub use state::AppState;
