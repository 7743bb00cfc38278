//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber for binaries embedding the client
//! - Configure log level from the environment or an explicit default
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - `RUST_LOG` wins over the level passed in
//! - The library itself only emits events; it never installs a subscriber

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a global fmt subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("mozillians={}", default_level).into());

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
