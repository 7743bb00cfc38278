//! Response classification.
//!
//! # Responsibilities
//! - Turn a buffered status + body into a `ResponseOutcome`
//! - Parse JSON only after the full body has been collected
//!
//! # Design Decisions
//! - Classification is a pure function so it can be tested without sockets
//! - HTTP-level failures are values, not errors; the retry engine decides
//!   what surfaces

use serde_json::Value;

use crate::config::ErrorCode;

/// Network code used when the client-side timer fires.
pub const TIMEOUT_CODE: &str = "ETIMEDOUT";

/// Result of a single transport attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseOutcome {
    Success(Value),
    AuthFailure { body: String },
    HttpError { status: u16, body: String },
    MalformedBody { body: String },
    NetworkError { code: String },
}

impl ResponseOutcome {
    pub fn network(code: &str) -> Self {
        ResponseOutcome::NetworkError {
            code: code.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ResponseOutcome::Success(_))
    }

    /// Code compared against the transient set. Only HTTP and network
    /// errors can ever be transient.
    pub fn retry_code(&self) -> Option<ErrorCode> {
        match self {
            ResponseOutcome::HttpError { status, .. } => Some(ErrorCode::Status(*status)),
            ResponseOutcome::NetworkError { code } => Some(ErrorCode::Network(code.clone())),
            _ => None,
        }
    }

    /// Short label for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            ResponseOutcome::Success(_) => "success",
            ResponseOutcome::AuthFailure { .. } => "auth_failure",
            ResponseOutcome::HttpError { .. } => "http_error",
            ResponseOutcome::MalformedBody { .. } => "malformed_body",
            ResponseOutcome::NetworkError { .. } => "network_error",
        }
    }
}

/// Classify a completed response.
pub fn classify(status: u16, body: String) -> ResponseOutcome {
    match status {
        403 => ResponseOutcome::AuthFailure { body },
        200 => match serde_json::from_str(&body) {
            Ok(value) => ResponseOutcome::Success(value),
            Err(_) => ResponseOutcome::MalformedBody { body },
        },
        status => ResponseOutcome::HttpError { status, body },
    }
}
