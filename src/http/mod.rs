//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum router, request ID, trace, CORS layers)
//!     → handler.rs (OPTIONS preflight | POST relay)
//!     → request.rs (Content-Length, body, `{"url": ...}`)
//!     → relay::Fetcher (outbound GET)
//!     → response.rs (JSON envelope, 200 or 500)
//!     → Send to client
//! ```

pub mod cors;
pub mod handler;
pub mod request;
pub mod response;
pub mod server;

pub use request::RelayRequest;
pub use response::{RelayResponse, Status};
pub use server::{build_router, AppState, RelayServer};
