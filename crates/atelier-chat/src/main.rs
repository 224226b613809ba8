//! Atelier chat terminal client.
//!
//! Runs the chat widget in the terminal against a relay endpoint.

use std::error::Error;

use clap::Parser;
use tokio::sync::mpsc;
use tracing::info;

mod app;
mod backend;
mod event;

use app::App;
use atelier_chat::{AssistantSignal, HttpRelayClient};
use event::{BackendCommand, UiEvent};

#[derive(Parser)]
#[command(name = "atelier-chat")]
#[command(about = "Chat with the Atelier studio assistant")]
#[command(version)]
struct Cli {
    /// Relay base URL
    #[arg(long, env = "ATELIER_RELAY_URL", default_value = "http://127.0.0.1:3000")]
    relay_url: String,

    /// Path the relay endpoint is mounted on
    #[arg(long, env = "ATELIER_RELAY_PATH", default_value = "/api/chat")]
    path: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Logs go to /tmp/atelier-chat.log so they never draw over the UI
    let log_file = std::fs::File::create("/tmp/atelier-chat.log").ok();
    if let Some(file) = log_file {
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_env_filter("atelier_chat=debug")
            .with_ansi(false)
            .init();
    }

    let cli = Cli::parse();
    let client = HttpRelayClient::new(&cli.relay_url, &cli.path);
    info!(url = %client.url(), "Starting chat client");

    // Create channels for UI <-> backend communication
    let (ui_tx, ui_rx) = mpsc::channel::<UiEvent>(100);
    let (cmd_tx, cmd_rx) = mpsc::channel::<BackendCommand>(100);

    // Spawn background thread with its own tokio runtime
    let runtime = tokio::runtime::Runtime::new()?;
    let bg_handle = std::thread::spawn(move || {
        runtime.block_on(backend::run_backend(client, ui_tx, cmd_rx));
    });

    // Initialize terminal (enters alternate screen, enables raw mode)
    let terminal = ratatui::init();

    let mut app = App::new(AssistantSignal::new(), ui_rx, cmd_tx);
    let result = app.run(terminal);

    // Restore terminal (exits alternate screen, disables raw mode)
    ratatui::restore();

    let _ = bg_handle.join();

    info!("Chat client shutdown complete");

    result.map_err(|e| e.into())
}
