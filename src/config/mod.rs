//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RelayConfig (validated, immutable)
//!     → CLI overrides (--port / RELAY_PORT)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once the server starts
//! - All fields have defaults; running with no file is the common case
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    LimitsConfig, ListenerConfig, ObservabilityConfig, RelayConfig, UpstreamConfig,
    DEFAULT_USER_AGENT,
};
pub use validation::{validate_config, ValidationError};
