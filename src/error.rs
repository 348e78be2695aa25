//! error types
//!
//! transport, graphql, and malformed-response failures are kept apart so
//! callers can tell "the server said no" from "the server sent garbage".

use crate::graphql::GraphQlError;
use std::fmt;

/// library result type
pub type Result<T> = std::result::Result<T, Error>;

/// error type for executors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    /// the network call itself failed (dns, connect, reading the body)
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// the server answered with a status other than 200
    #[error("the server responded with {status}: {body}")]
    Status {
        /// http status code
        status: u16,
        /// raw response body
        body: String,
    },

    #[error("graphql error: {message}")]
    GraphQl {
        /// message built from the `error` or `errors` field
        message: String,
        /// raw `errors` entries; a non-array `errors` is kept as one entry
        /// and a singular `error` leaves this empty
        errors: Vec<serde_json::Value>,
    },

    #[error("malformed response: {reason}")]
    MalformedResponse {
        /// what was wrong with the payload
        reason: String,
        /// raw response body
        body: String,
    },

    /// typed (de)serialization failed, e.g. `data` did not fit the requested type
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("url error: {0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    pub(crate) fn malformed(reason: impl Into<String>, body: &str) -> Self {
        Error::MalformedResponse {
            reason: reason.into(),
            body: body.to_string(),
        }
    }

    /// true for network failures and non-200 responses
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Http(_) | Error::Status { .. })
    }

    /// http status attached to the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Status { status, .. } => Some(*status),
            Error::Http(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }

    /// true if the error looks like an auth failure
    pub fn is_auth_error(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }

    /// typed view of the `errors` entries
    ///
    /// entries that do not carry at least a `message` string are skipped.
    pub fn graphql_errors(&self) -> Vec<GraphQlError> {
        match self {
            Error::GraphQl { errors, .. } => errors
                .iter()
                .filter_map(|entry| serde_json::from_value(entry.clone()).ok())
                .collect(),
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for GraphQlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}
