//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_requests_total` (counter): POST outcomes by `outcome` and `kind`
//! - `relay_upstream_duration_seconds` (histogram): outbound fetch latency
//!
//! Recording goes through the `metrics` facade and is a no-op until a
//! recorder is installed by [`init_metrics`].

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::relay::ErrorKind;

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint started");
    Ok(())
}

/// Count a relay outcome. `None` means success.
pub fn record_outcome(kind: Option<ErrorKind>) {
    match kind {
        None => counter!("relay_requests_total", "outcome" => "success", "kind" => "none")
            .increment(1),
        Some(kind) => counter!(
            "relay_requests_total",
            "outcome" => "error",
            "kind" => kind.as_str()
        )
        .increment(1),
    }
}

pub fn record_upstream(start: Instant) {
    histogram!("relay_upstream_duration_seconds").record(start.elapsed().as_secs_f64());
}
