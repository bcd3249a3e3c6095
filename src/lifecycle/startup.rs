//! Startup orchestration.
//!
//! Order: load config → validate → build the outbound client → bind.
//! Any failure is fatal and reported before traffic is accepted.

use std::path::Path;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{load_config, validate_config, ConfigError, RelayConfig};

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

/// Load the config file if one was given, apply the port override, validate.
pub fn resolve_config(
    path: Option<&Path>,
    port: Option<u16>,
) -> Result<RelayConfig, StartupError> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => RelayConfig::default(),
    };

    if let Some(port) = port {
        config.set_port(port);
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    Ok(config)
}

/// Bind the listening socket for the configured address.
pub async fn bind_listener(config: &RelayConfig) -> Result<TcpListener, StartupError> {
    let address = config.listener.bind_address.clone();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind { address, source })?;
    Ok(listener)
}
