//! Timeout enforcement.
//!
//! # Responsibilities
//! - Wrap a transport exchange with the client-side deadline
//! - Cancel the in-flight request cleanly on expiry
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities; dropping the future aborts the request
//! - Expiry is reported as `None` and mapped to `ETIMEDOUT` by the caller

use std::future::Future;
use std::time::Duration;

/// Run `future` with a deadline. Returns `None` if the deadline passed first.
pub async fn with_timeout<F: Future>(duration: Duration, future: F) -> Option<F::Output> {
    match tokio::time::timeout(duration, future).await {
        Ok(output) => Some(output),
        Err(_) => {
            tracing::debug!(timeout_ms = duration.as_millis() as u64, "Deadline exceeded");
            None
        }
    }
}
