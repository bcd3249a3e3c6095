//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! Every section is optional; a missing section takes its defaults.

use serde::{Deserialize, Serialize};

/// User agent sent on every outbound fetch.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Root configuration for the relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Outbound fetch settings.
    pub upstream: UpstreamConfig,

    /// Inbound request limits.
    pub limits: LimitsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl RelayConfig {
    /// Replace the port of the bind address, keeping the host part.
    pub fn set_port(&mut self, port: u16) {
        let host = match self.listener.bind_address.rsplit_once(':') {
            Some((host, _)) => host.to_string(),
            None => self.listener.bind_address.clone(),
        };
        self.listener.bind_address = format!("{}:{}", host, port);
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8001").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8001".to_string(),
        }
    }
}

/// Outbound request configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Value of the `User-Agent` header on outbound requests.
    pub user_agent: String,

    /// Total fetch timeout in seconds. Unset means the fetch may wait forever.
    pub timeout_secs: Option<u64>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: None,
        }
    }
}

/// Limits applied to inbound requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum inbound body size in bytes.
    pub max_body_size: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_size: 2 * 1024 * 1024, // 2MB
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
