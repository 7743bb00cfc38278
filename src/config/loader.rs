//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ClientConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

pub(crate) fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<ClientConfig, ConfigError> {
    let config: ClientConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ClientConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config = parse_config(&content)?;

    tracing::debug!(path = %path.display(), hostname = %config.hostname, "Configuration loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn loads_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            hostname = "staging.mozillians.org"
            timeout_ms = 2000
            delay_factor_ms = 10
            "#
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.hostname, "staging.mozillians.org");
        assert_eq!(config.timeout_ms, 2000);
        assert_eq!(config.delay_factor_ms, 10);
        assert_eq!(config.retries, 5);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_config(Path::new("/nonexistent/mozillians.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn bad_toml_is_parse_error() {
        let err = parse_config("retries = \"many\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn invalid_values_are_reported() {
        let err = parse_config("timeout_ms = 0\nhostname = \"\"").unwrap_err();
        match err {
            ConfigError::Validation(errors) => assert_eq!(errors.len(), 2),
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(parse_config("timeout_ms = 0")
            .unwrap_err()
            .to_string()
            .contains("timeout_ms: must be greater than zero"));
    }
}
