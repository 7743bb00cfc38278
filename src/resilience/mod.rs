//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request to the directory service:
//!     → timeouts.rs (enforce client-side deadline per attempt)
//!     → On failure: retries.rs (check if transient, retry with backoff)
//!     → backoff.rs (capped exponential delay, pluggable sleeper)
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every attempt has a deadline
//! - Only GET is ever issued, so every request is safe to retry
//! - A started backoff delay is not interruptible short of dropping the call

pub mod backoff;
pub mod retries;
pub mod timeouts;

pub use backoff::{calculate_backoff, Sleeper, TokioSleeper};
pub use retries::{retry, RetryPolicy};
