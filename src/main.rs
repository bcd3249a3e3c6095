//! URL relay server.
//!
//! ```text
//!     Browser                    ┌──────────────────────────────┐
//!     POST {"url": U} ──────────▶│  url-relay (axum)            │
//!                                │    → parse body              │
//!                                │    → GET U (reqwest) ────────┼──────▶ Remote site
//!     {"content": ...} ◀─────────│    ← UTF-8 body ◀────────────┼───────
//!     + CORS headers             └──────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use url_relay::lifecycle::{signals, startup, Shutdown, StartupError};
use url_relay::observability::{logging, metrics};
use url_relay::RelayServer;

#[derive(Parser)]
#[command(name = "url-relay")]
#[command(about = "Fetch URLs server-side and return their bodies as JSON", long_about = None)]
struct Cli {
    /// Optional TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on; overrides the configured bind address port.
    #[arg(short, long, env = "RELAY_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = startup::resolve_config(cli.config.as_deref(), cli.port)?;

    logging::init(&config.observability);

    tracing::info!("url-relay v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream_timeout_secs = ?config.upstream.timeout_secs,
        max_body_size = config.limits.max_body_size,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics endpoint");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let server = RelayServer::new(config).map_err(StartupError::Client)?;
    let listener = startup::bind_listener(server.config()).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::wait_for_shutdown().await;
        shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
