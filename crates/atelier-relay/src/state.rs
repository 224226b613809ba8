//! Shared application state.

use std::sync::Arc;

use crate::metrics::RelayMetrics;
use crate::relay::Relay;

/// Shared application state.
///
/// Nothing here is mutated per request except the atomic outcome counters.
pub struct AppState {
    /// Relay over the configured provider.
    pub relay: Relay,

    /// Outcome counters for `/metrics`.
    pub metrics: RelayMetrics,
}

impl AppState {
    /// Create a new AppState wrapped in Arc.
    pub fn new(relay: Relay) -> Arc<Self> {
        Arc::new(Self {
            relay,
            metrics: RelayMetrics::new(),
        })
    }
}
