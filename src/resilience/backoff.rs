//! Exponential backoff with a ceiling.

use std::time::Duration;

use async_trait::async_trait;

/// Calculate the delay before retry number `retry` (1-based).
///
/// The delay is `2^retry * base_ms`, so the first retry waits twice the
/// base, and no single delay exceeds `max_ms`.
pub fn calculate_backoff(retry: u32, base_ms: u64, max_ms: u64) -> Duration {
    let exponential_base = 2u64.saturating_pow(retry);
    let delay_ms = base_ms.saturating_mul(exponential_base);

    Duration::from_millis(delay_ms.min(max_ms))
}

/// Suspends the calling task between retries.
///
/// Swappable so tests can record delays instead of waiting them out.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, delay: Duration);
}

/// Sleeps on the tokio timer without blocking the thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, delay: Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}
