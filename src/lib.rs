//! URL relay library.
//!
//! Accepts `{"url": "..."}` over POST, fetches the URL server-side and
//! returns its body as JSON, with permissive CORS headers on every response.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod relay;

pub use config::RelayConfig;
pub use http::{RelayResponse, RelayServer};
pub use lifecycle::Shutdown;
pub use relay::{ErrorKind, Fetcher, RelayError};
