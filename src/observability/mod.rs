//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! handlers and fetcher produce:
//!     → logging.rs (structured log events, request ID in fields)
//!     → metrics.rs (outcome counters, upstream latency)
//!
//! Consumers:
//!     → stdout
//!     → Prometheus scrape (only when enabled)
//! ```

pub mod logging;
pub mod metrics;
