//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML) or ClientConfig::default()
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ClientConfig (validated, immutable)
//!     → shared via Arc by every request the client issues
//! ```
//!
//! # Design Decisions
//! - Config is immutable once handed to a client
//! - All fields have defaults to allow minimal configs
//! - Transient error codes are explicit config, not process-wide state

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{default_transient_error_codes, ClientConfig, ErrorCode, DEFAULT_HOSTNAME};
pub use validation::{validate_config, ValidationError};
