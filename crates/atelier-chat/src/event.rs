//! Event types for communication between the relay backend and the UI.

use atelier_chat::{PendingSubmit, RelayOutcome};

/// Events sent from the backend to the UI thread.
#[derive(Debug)]
pub enum UiEvent {
    /// Result of the startup health check.
    RelayHealth(bool),

    /// A relay call completed.
    RelayFinished(PendingSubmit, RelayOutcome),
}

/// Commands sent from the UI to the backend.
#[derive(Debug)]
pub enum BackendCommand {
    /// Deliver one submit to the relay.
    Relay(PendingSubmit),

    /// Quit the application.
    Quit,
}
