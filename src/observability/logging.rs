//! Structured logging.
//!
//! Uses `tracing` with an `EnvFilter`. `RUST_LOG` takes precedence over the
//! configured level.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

/// Filter used when `RUST_LOG` is not set.
pub fn default_filter(config: &ObservabilityConfig) -> String {
    format!(
        "url_relay={level},tower_http={level}",
        level = config.log_level
    )
}

/// Install the global subscriber. Call once, at process start.
pub fn init(config: &ObservabilityConfig) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(config).into()))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
