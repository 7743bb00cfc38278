//! Error taxonomy surfaced to callers.
//!
//! Every failure that comes out of a request chain carries the number of
//! retries actually performed, so "gave up after N attempts" can be told
//! apart from "failed immediately as non-retryable".

use thiserror::Error;

use crate::config::loader::join_errors;
use crate::config::{ErrorCode, ValidationError};

/// Convenience alias for results in this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by [`crate::MozilliansClient`] and its pages.
#[derive(Debug, Error)]
pub enum Error {
    /// Bad constructor or query-option input. Never retried.
    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    /// The service answered 403.
    #[error("Authentication failed after {retries} retries: {body}")]
    Authentication { body: String, retries: u32 },

    /// A non-200 status other than 403.
    #[error("Unexpected status {status} after {retries} retries: {body}")]
    Http { status: u16, body: String, retries: u32 },

    /// A 200 response whose body is not valid JSON.
    #[error("Failed to parse JSON payload after {retries} retries: {body}")]
    MalformedResponse { body: String, retries: u32 },

    /// Connection-level failure before a response was received.
    #[error("Network error {code} after {retries} retries")]
    Network { code: String, retries: u32 },

    /// The client-side timeout fired.
    #[error("Request timed out after {retries} retries")]
    Timeout { retries: u32 },

    /// The underlying HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[from] reqwest::Error),
}

impl Error {
    pub(crate) fn validation(field: &str, message: impl Into<String>) -> Self {
        Error::Validation(vec![ValidationError::new(field, message)])
    }

    /// Retries performed before this error surfaced, if it came from a request.
    pub fn retries(&self) -> Option<u32> {
        match self {
            Error::Authentication { retries, .. }
            | Error::Http { retries, .. }
            | Error::MalformedResponse { retries, .. }
            | Error::Network { retries, .. }
            | Error::Timeout { retries } => Some(*retries),
            Error::Validation(_) | Error::ClientBuild(_) => None,
        }
    }

    /// HTTP status of the failed response, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Authentication { .. } => Some(403),
            Error::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw response body, when the failure carried one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Error::Authentication { body, .. }
            | Error::Http { body, .. }
            | Error::MalformedResponse { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Code matched against the transient set.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Error::Authentication { .. } => Some(ErrorCode::Status(403)),
            Error::Http { status, .. } => Some(ErrorCode::Status(*status)),
            Error::MalformedResponse { .. } => Some(ErrorCode::network("INVALID_JSON")),
            Error::Network { code, .. } => Some(ErrorCode::Network(code.clone())),
            Error::Timeout { .. } => Some(ErrorCode::network("ETIMEDOUT")),
            Error::Validation(_) | Error::ClientBuild(_) => None,
        }
    }
}
