//! Metrics collection.
//!
//! # Metrics
//! - `mozillians_attempts_total` (counter): transport attempts by outcome
//! - `mozillians_attempt_duration_seconds` (histogram): per-attempt latency
//! - `mozillians_retries_total` (counter): retries by triggering code
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; the embedding application
//!   installs whatever recorder/exporter it wants (no-op otherwise)

use std::time::Instant;

/// Record one transport attempt and its latency.
pub fn record_attempt(outcome: &'static str, start: Instant) {
    let duration = start.elapsed().as_secs_f64();

    metrics::counter!("mozillians_attempts_total", "outcome" => outcome).increment(1);
    metrics::histogram!("mozillians_attempt_duration_seconds", "outcome" => outcome).record(duration);
}

/// Record a retry triggered by `code`.
pub fn record_retry(code: &str) {
    metrics::counter!("mozillians_retries_total", "code" => code.to_string()).increment(1);
}
