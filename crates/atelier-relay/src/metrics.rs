//! Relay outcome counters in Prometheus text exposition format.

use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::RelayError;

/// Outcome labels, in exposition order.
const OUTCOMES: [&str; 5] = [
    "success",
    "validation_error",
    "configuration_error",
    "upstream_error",
    "transport_error",
];

/// Monotonic counters shared by all concurrent relay invocations.
#[derive(Debug, Default)]
pub struct RelayMetrics {
    outcomes: [AtomicU64; 5],
    fallback_replies: AtomicU64,
}

impl RelayMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a successful reply.
    pub fn record_success(&self, fallback: bool) {
        self.bump("success");
        if fallback {
            self.fallback_replies.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Count a failed invocation.
    pub fn record_error(&self, error: &RelayError) {
        self.bump(error.outcome());
    }

    /// Current count for an outcome label.
    pub fn count(&self, outcome: &str) -> u64 {
        OUTCOMES
            .iter()
            .position(|o| *o == outcome)
            .map(|i| self.outcomes[i].load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    pub fn fallback_replies(&self) -> u64 {
        self.fallback_replies.load(Ordering::Relaxed)
    }

    fn bump(&self, outcome: &str) {
        if let Some(i) = OUTCOMES.iter().position(|o| *o == outcome) {
            self.outcomes[i].fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Format all counters as Prometheus text.
    pub fn render(&self) -> String {
        let mut output = String::new();

        writeln!(
            output,
            "# HELP atelier_relay_requests_total Relay invocations by outcome"
        )
        .ok();
        writeln!(output, "# TYPE atelier_relay_requests_total counter").ok();
        for outcome in OUTCOMES {
            writeln!(
                output,
                "atelier_relay_requests_total{{outcome=\"{outcome}\"}} {}",
                self.count(outcome)
            )
            .ok();
        }

        writeln!(output).ok();
        writeln!(
            output,
            "# HELP atelier_relay_fallback_replies_total Successful replies that used the fallback text"
        )
        .ok();
        writeln!(output, "# TYPE atelier_relay_fallback_replies_total counter").ok();
        writeln!(
            output,
            "atelier_relay_fallback_replies_total {}",
            self.fallback_replies()
        )
        .ok();

        output
    }
}
