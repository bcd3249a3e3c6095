//! Inbound request parsing.
//!
//! A relay request is a JSON object with a string `url` field. Anything
//! else in the object is ignored; no coercion is attempted (a numeric `url`
//! is rejected, not stringified).

use axum::body::Body;
use axum::http::{header, HeaderMap};
use serde_json::Value;
use url::Url;

use crate::relay::RelayError;

/// A validated relay request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayRequest {
    pub url: Url,
}

/// Read the declared `Content-Length`. It must be present and numeric.
pub fn content_length(headers: &HeaderMap) -> Result<usize, RelayError> {
    let value = headers
        .get(header::CONTENT_LENGTH)
        .ok_or(RelayError::MissingContentLength)?;
    let text = value.to_str().map_err(|_| {
        RelayError::InvalidContentLength(String::from_utf8_lossy(value.as_bytes()).into_owned())
    })?;
    text.trim()
        .parse::<usize>()
        .map_err(|_| RelayError::InvalidContentLength(text.to_string()))
}

/// Collect the body, bounded by `limit` bytes.
pub async fn read_body(body: Body, limit: usize) -> Result<Vec<u8>, RelayError> {
    axum::body::to_bytes(body, limit)
        .await
        .map(|bytes| bytes.to_vec())
        .map_err(|e| RelayError::Body(e.to_string()))
}

/// Parse a relay request from raw body bytes.
pub fn parse_relay_request(body: &[u8]) -> Result<RelayRequest, RelayError> {
    let value: Value = serde_json::from_slice(body)?;
    let object = value.as_object().ok_or(RelayError::NotAnObject)?;
    let raw = match object.get("url") {
        None => return Err(RelayError::MissingUrl),
        Some(Value::String(s)) => s,
        Some(_) => return Err(RelayError::UrlNotString),
    };
    let url = Url::parse(raw).map_err(|source| RelayError::InvalidUrl {
        url: raw.clone(),
        source,
    })?;
    Ok(RelayRequest { url })
}
