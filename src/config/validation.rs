//! Configuration validation.
//!
//! Serde handles syntax; this module checks values that parse but cannot
//! be used (bad socket addresses, header-invalid user agents, zero limits).
//! All errors are collected, not just the first.

use std::net::SocketAddr;

use axum::http::HeaderValue;
use thiserror::Error;

use crate::config::schema::RelayConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    if config.upstream.user_agent.trim().is_empty() {
        errors.push(ValidationError::new("upstream.user_agent", "must not be empty"));
    } else if HeaderValue::from_str(&config.upstream.user_agent).is_err() {
        errors.push(ValidationError::new(
            "upstream.user_agent",
            "contains characters not allowed in a header value",
        ));
    }

    if config.upstream.timeout_secs == Some(0) {
        errors.push(ValidationError::new(
            "upstream.timeout_secs",
            "must be greater than zero when set",
        ));
    }

    if config.limits.max_body_size == 0 {
        errors.push(ValidationError::new("limits.max_body_size", "must be greater than zero"));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!(
                "'{}' is not a socket address",
                config.observability.metrics_address
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
