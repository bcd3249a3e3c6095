//! Relay error taxonomy.
//!
//! Every failure in a POST carries an [`ErrorKind`] for logs and metrics,
//! but all of them reach the caller the same way: HTTP 500 with a free-text
//! message (see `http::response`).

use std::error::Error as StdError;
use std::fmt;

use thiserror::Error;

/// Coarse failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Missing/invalid Content-Length, unreadable body, bad JSON, bad `url`.
    MalformedInput,
    /// DNS, connect, transport or upstream HTTP status failure.
    Network,
    /// Upstream body is not valid UTF-8.
    Decode,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::MalformedInput => "malformed_input",
            ErrorKind::Network => "network",
            ErrorKind::Decode => "decode",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while handling a relay request.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("missing Content-Length header")]
    MissingContentLength,

    #[error("invalid Content-Length header: {0:?}")]
    InvalidContentLength(String),

    #[error("failed to read request body: {0}")]
    Body(String),

    #[error("{0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("request body must be a JSON object")]
    NotAnObject,

    #[error("missing `url` field")]
    MissingUrl,

    #[error("`url` field must be a string")]
    UrlNotString,

    #[error("invalid url {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error(transparent)]
    Fetch(#[from] reqwest::Error),

    #[error("response body is not valid UTF-8: {0}")]
    Decode(#[from] std::string::FromUtf8Error),
}

impl RelayError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RelayError::MissingContentLength
            | RelayError::InvalidContentLength(_)
            | RelayError::Body(_)
            | RelayError::InvalidJson(_)
            | RelayError::NotAnObject
            | RelayError::MissingUrl
            | RelayError::UrlNotString
            | RelayError::InvalidUrl { .. } => ErrorKind::MalformedInput,
            RelayError::Fetch(_) => ErrorKind::Network,
            RelayError::Decode(_) => ErrorKind::Decode,
        }
    }

    /// Human-readable message including the chain of underlying causes.
    ///
    /// reqwest keeps the interesting part ("Connection refused") in
    /// `source()`, so the plain `Display` text is not enough.
    pub fn message(&self) -> String {
        error_chain(self)
    }
}

/// Join an error and its sources with `": "`, skipping repeated text.
pub fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !text.is_empty() && !message.ends_with(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
