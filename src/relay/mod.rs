//! Relay core.
//!
//! # Data Flow
//! ```text
//! parsed `url`
//!     → fetch.rs (GET with fixed User-Agent, strict UTF-8 decode)
//!     → Ok(text) | Err(RelayError)
//!     → error.rs (kind + message for the 500 envelope)
//! ```

pub mod error;
pub mod fetch;

pub use error::{ErrorKind, RelayError};
pub use fetch::Fetcher;
