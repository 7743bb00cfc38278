//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeout > 0, known scheme)
//! - Reject hostnames that would smuggle a path or query into the URL
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ClientConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted by the client

use thiserror::Error;

use crate::config::schema::ClientConfig;

/// A single rejected field, shared by config and query-option validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Check a configuration for semantic problems.
pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.timeout_ms == 0 {
        errors.push(ValidationError::new("timeout_ms", "must be greater than zero"));
    }

    if config.scheme != "https" && config.scheme != "http" {
        errors.push(ValidationError::new(
            "scheme",
            format!("unsupported scheme '{}'", config.scheme),
        ));
    }

    if config.hostname.trim().is_empty() {
        errors.push(ValidationError::new("hostname", "must not be empty"));
    } else if config.hostname.contains(['/', '?', '#', '@']) {
        errors.push(ValidationError::new(
            "hostname",
            format!("'{}' must be a bare host", config.hostname),
        ));
    } else if let Err(e) = config.base_url() {
        errors.push(e);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
