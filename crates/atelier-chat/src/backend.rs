//! Background task that talks to the relay.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use atelier_chat::{HttpRelayClient, RelayOutcome, RelayTransport};

use crate::event::{BackendCommand, UiEvent};

/// Run the backend loop.
///
/// This function runs in a separate thread with its own tokio runtime. The
/// health check and each relay command run on their own tasks so the loop
/// keeps draining commands (including `Quit`) while the relay is slow or
/// unreachable. The widget already limits itself to one call at a time.
pub async fn run_backend(
    client: HttpRelayClient,
    ui_tx: mpsc::Sender<UiEvent>,
    mut cmd_rx: mpsc::Receiver<BackendCommand>,
) {
    let client = Arc::new(client);
    info!(url = %client.url(), "Relay backend started");

    let health_check = {
        let client = Arc::clone(&client);
        let ui_tx = ui_tx.clone();
        tokio::spawn(async move {
            let healthy = match client.health().await {
                Ok(ok) => ok,
                Err(e) => {
                    warn!(error = %e, "Relay health check failed");
                    false
                }
            };
            let _ = ui_tx.send(UiEvent::RelayHealth(healthy)).await;
        })
    };

    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            BackendCommand::Quit => {
                info!("Received quit command, shutting down backend");
                break;
            }
            BackendCommand::Relay(pending) => {
                debug!(chars = pending.message().len(), "Relaying message");
                let client = Arc::clone(&client);
                let ui_tx = ui_tx.clone();
                tokio::spawn(async move {
                    let outcome = RelayOutcome::from(client.send(&pending.request()).await);
                    if ui_tx
                        .send(UiEvent::RelayFinished(pending, outcome))
                        .await
                        .is_err()
                    {
                        debug!("UI gone before relay reply arrived");
                    }
                });
            }
        }
    }

    health_check.abort();
    info!("Backend shutdown complete");
}
