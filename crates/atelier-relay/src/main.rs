//! Atelier Relay Server

use std::net::SocketAddr;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use atelier_relay::{create_router, AppState, ProviderConfig, ProviderVariant, Relay, RelayConfig};

/// Atelier chat relay.
#[derive(Parser, Debug)]
#[command(name = "atelier-relay", about = "Relay website chat messages to a completion provider")]
#[command(version)]
struct Args {
    /// HTTP server address
    #[arg(long, env = "ATELIER_BIND", default_value = "127.0.0.1:3000")]
    bind: String,

    /// Path the relay endpoint is mounted on
    #[arg(long, env = "ATELIER_RELAY_PATH", default_value = "/api/chat")]
    path: String,

    /// Provider preset
    #[arg(long, env = "ATELIER_PROVIDER", value_enum, default_value = "studio")]
    provider: ProviderVariant,

    /// Override the preset's model identifier
    #[arg(long)]
    model: Option<String>,

    /// Override the preset's provider base URL
    #[arg(long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("atelier_relay=info,tower_http=info")),
        )
        .with_target(true)
        .init();

    let args = Args::parse();

    // Load config
    let mut provider = ProviderConfig::from_env(args.provider);
    if let Some(model) = args.model {
        provider.model = model;
    }
    if let Some(base_url) = args.base_url {
        provider.base_url = base_url;
    }

    let config = RelayConfig {
        bind_addr: args.bind,
        relay_path: args.path,
        provider,
    };
    let addr: SocketAddr = config.bind_addr.parse()?;

    if !config.provider.has_api_key() {
        warn!(
            variable = config.provider.variant.api_key_var(),
            "Provider API key is not set - every relay call will fail until it is configured"
        );
    }

    info!(
        provider = %config.provider.variant,
        model = %config.provider.model,
        base_url = %config.provider.base_url,
        "Provider configured"
    );

    // Create shared state and router
    let state = AppState::new(Relay::from_config(config.provider));
    let router = create_router(state, &config.relay_path);

    let listener = TcpListener::bind(addr).await?;
    info!(addr = %addr, path = %config.relay_path, "Relay listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Relay shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
