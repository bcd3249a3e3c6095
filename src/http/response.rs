//! Relay response envelope.
//!
//! Success: `{"content": ..., "status": "success"}` with 200.
//! Failure: `{"status": "error", "message": ...}` with 500, whatever the
//! error kind. The kind is only visible in logs and metrics.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::relay::RelayError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// JSON body returned for every POST.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelayResponse {
    Success { content: String, status: Status },
    Error { status: Status, message: String },
}

impl RelayResponse {
    pub fn success(content: String) -> Self {
        RelayResponse::Success {
            content,
            status: Status::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        RelayResponse::Error {
            status: Status::Error,
            message: message.into(),
        }
    }

    pub fn status(&self) -> Status {
        match self {
            RelayResponse::Success { status, .. } | RelayResponse::Error { status, .. } => *status,
        }
    }
}

impl IntoResponse for RelayResponse {
    fn into_response(self) -> Response {
        let code = match self.status() {
            Status::Success => StatusCode::OK,
            Status::Error => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (code, Json(self)).into_response()
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        RelayResponse::error(self.message()).into_response()
    }
}
