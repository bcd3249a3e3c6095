//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Build client → Bind listener
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting → Finish in-flight requests → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! The listening socket is the only process-wide state. It is bound in
//! `startup` and closed when the server future returns.

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::StartupError;
