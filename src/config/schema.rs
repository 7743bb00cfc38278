//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the client.
//! All types derive Serde traits for deserialization from config files.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::validation::ValidationError;

/// Production host of the directory service.
pub const DEFAULT_HOSTNAME: &str = "mozillians.org";

/// An error code the retry engine can match against: either an HTTP status
/// or a platform network error identifier such as `ECONNRESET`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ErrorCode {
    Status(u16),
    Network(String),
}

impl ErrorCode {
    pub fn network(code: &str) -> Self {
        ErrorCode::Network(code.to_string())
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::Status(status) => write!(f, "{}", status),
            ErrorCode::Network(code) => f.write_str(code),
        }
    }
}

/// Error codes that cause a retry unless overridden.
pub fn default_transient_error_codes() -> Vec<ErrorCode> {
    vec![
        ErrorCode::network("ETIMEDOUT"),
        ErrorCode::network("ECONNRESET"),
        ErrorCode::network("EADDRINUSE"),
        ErrorCode::network("ESOCKETTIMEDOUT"),
        ErrorCode::network("ECONNREFUSED"),
        ErrorCode::Status(500),
        ErrorCode::Status(502),
        ErrorCode::Status(503),
        ErrorCode::Status(504),
    ]
}

/// Root configuration for a [`crate::MozilliansClient`].
///
/// Immutable once handed to the client; every request issued by that client
/// reads from the same instance.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Client-side timeout for a single attempt, in milliseconds.
    pub timeout_ms: u64,

    /// URL scheme used for endpoint requests ("https" or "http").
    pub scheme: String,

    /// Host (optionally with `:port`) used in place of the production host.
    pub hostname: String,

    /// Maximum number of retries after the first attempt.
    pub retries: u32,

    /// Base delay for exponential backoff in milliseconds.
    pub delay_factor_ms: u64,

    /// Ceiling for a single backoff delay in milliseconds.
    pub max_delay_ms: u64,

    /// HTTP statuses and network error codes considered transient.
    pub transient_error_codes: Vec<ErrorCode>,

    /// Shared connection-reuse handle. `None` builds a dedicated client.
    /// A supplied client should come from [`crate::http::client_builder`] so
    /// that redirects are not followed.
    #[serde(skip)]
    pub agent: Option<reqwest::Client>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 15_000,
            scheme: "https".to_string(),
            hostname: DEFAULT_HOSTNAME.to_string(),
            retries: 5,
            delay_factor_ms: 100,
            max_delay_ms: 30_000,
            transient_error_codes: default_transient_error_codes(),
            agent: None,
        }
    }
}

impl ClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Root URL endpoint paths are resolved against.
    pub fn base_url(&self) -> Result<Url, ValidationError> {
        let base = format!("{}://{}/", self.scheme, self.hostname);
        Url::parse(&base).map_err(|e| {
            ValidationError::new("hostname", format!("cannot build URL from '{}': {}", base, e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_production_settings() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout_ms, 15_000);
        assert_eq!(config.hostname, "mozillians.org");
        assert_eq!(config.retries, 5);
        assert_eq!(config.delay_factor_ms, 100);
        assert_eq!(config.max_delay_ms, 30_000);
        assert_eq!(config.transient_error_codes.len(), 9);
        assert!(config.agent.is_none());
    }

    #[test]
    fn mixed_transient_codes_deserialize() {
        let config: ClientConfig = toml::from_str(
            r#"
            retries = 2
            transient_error_codes = ["ECONNRESET", 503]
            "#,
        )
        .unwrap();

        assert_eq!(config.retries, 2);
        assert_eq!(config.timeout_ms, 15_000);
        assert_eq!(
            config.transient_error_codes,
            vec![ErrorCode::network("ECONNRESET"), ErrorCode::Status(503)]
        );
    }

    #[test]
    fn base_url_includes_port() {
        let config = ClientConfig {
            scheme: "http".to_string(),
            hostname: "127.0.0.1:8080".to_string(),
            ..Default::default()
        };
        assert_eq!(config.base_url().unwrap().as_str(), "http://127.0.0.1:8080/");
    }

    #[test]
    fn error_code_display() {
        assert_eq!(ErrorCode::Status(502).to_string(), "502");
        assert_eq!(ErrorCode::network("ETIMEDOUT").to_string(), "ETIMEDOUT");
    }
}
