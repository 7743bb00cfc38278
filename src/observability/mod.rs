//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! transport and retry engine produce:
//!     → structured log events (tracing)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → logging.rs subscriber (stderr) in the CLI
//!     → whatever metrics recorder the host application installs
//! ```
//!
//! # Design Decisions
//! - The API key is never a log field or metric label
//! - Metrics are cheap when no recorder is installed

pub mod logging;
pub mod metrics;
