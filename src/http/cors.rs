//! Permissive cross-origin headers.
//!
//! Every response, including errors and axum's own 405s, carries exactly one
//! copy of each header. `overriding` replaces anything a handler set.

use axum::http::{header, HeaderName, HeaderValue};
use tower_http::set_header::SetResponseHeaderLayer;

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "GET, POST, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type";

/// The three CORS headers in the order they are applied.
pub fn cors_headers() -> [(HeaderName, HeaderValue); 3] {
    [
        (
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static(ALLOW_ORIGIN),
        ),
        (
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        ),
        (
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOW_HEADERS),
        ),
    ]
}

/// One layer per header, ready to stack on a router.
pub fn cors_layers() -> [SetResponseHeaderLayer<HeaderValue>; 3] {
    cors_headers().map(|(name, value)| SetResponseHeaderLayer::overriding(name, value))
}
