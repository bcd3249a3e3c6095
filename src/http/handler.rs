//! Relay handlers.
//!
//! OPTIONS answers the browser preflight. POST runs the whole relay:
//! Content-Length check → body → JSON → outbound GET → envelope. Every
//! failure along the way lands in the single match in [`handle_post`].

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};

use crate::http::request::{content_length, parse_relay_request, read_body};
use crate::http::response::RelayResponse;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::relay::RelayError;

/// Preflight: 200, empty body. CORS headers come from the router layers.
pub async fn handle_options() -> StatusCode {
    StatusCode::OK
}

/// Relay a `{"url": ...}` body to its target and wrap the result.
pub async fn handle_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Body,
) -> Response {
    let request_id = headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    match relay(&state, &headers, body, &request_id).await {
        Ok(content) => {
            tracing::info!(
                request_id = %request_id,
                bytes = content.len(),
                "Relay succeeded"
            );
            metrics::record_outcome(None);
            RelayResponse::success(content).into_response()
        }
        Err(e) => {
            tracing::warn!(
                request_id = %request_id,
                kind = %e.kind(),
                error = %e.message(),
                "Relay failed"
            );
            metrics::record_outcome(Some(e.kind()));
            e.into_response()
        }
    }
}

async fn relay(
    state: &AppState,
    headers: &HeaderMap,
    body: Body,
    request_id: &str,
) -> Result<String, RelayError> {
    let declared = content_length(headers)?;
    let limit = declared.min(state.max_body_size);
    let bytes = read_body(body, limit).await?;
    let request = parse_relay_request(&bytes)?;

    tracing::debug!(
        request_id = %request_id,
        url = %request.url,
        "Fetching"
    );

    state.fetcher.fetch(&request.url).await
}
