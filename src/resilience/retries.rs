//! Retry logic.
//!
//! # Responsibilities
//! - Classify a failed attempt as transient or permanent
//! - Execute retries with capped exponential backoff
//! - Annotate the surfaced failure with the retries actually performed
//!
//! # Design Decisions
//! - Only HTTP errors and network errors whose code is in the transient set
//!   are retried; auth failures and malformed bodies fail immediately
//! - Every retry calls the attempt closure again, so each attempt gets a
//!   freshly built request
//! - No jitter: the schedule is deterministic and testable

use std::future::Future;
use std::time::Duration;

use serde_json::Value;

use crate::config::{ClientConfig, ErrorCode};
use crate::error::{Error, Result};
use crate::http::response::{ResponseOutcome, TIMEOUT_CODE};
use crate::observability::metrics;
use crate::resilience::backoff::{calculate_backoff, Sleeper};

/// Retry settings derived from a client's configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub retries: u32,
    pub delay_factor_ms: u64,
    pub max_delay_ms: u64,
    pub transient_error_codes: Vec<ErrorCode>,
}

impl RetryPolicy {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            retries: config.retries,
            delay_factor_ms: config.delay_factor_ms,
            max_delay_ms: config.max_delay_ms,
            transient_error_codes: config.transient_error_codes.clone(),
        }
    }

    /// Whether `outcome` is worth another attempt.
    pub fn is_transient(&self, outcome: &ResponseOutcome) -> bool {
        outcome
            .retry_code()
            .is_some_and(|code| self.transient_error_codes.contains(&code))
    }

    /// Delay before retry number `retry` (1-based): `2^retry` times the factor,
    /// capped.
    pub fn delay_for(&self, retry: u32) -> Duration {
        calculate_backoff(retry, self.delay_factor_ms, self.max_delay_ms)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&ClientConfig::default())
    }
}

/// Run `attempt` until it succeeds, fails permanently, or retries run out.
pub async fn retry<F, Fut>(policy: &RetryPolicy, sleeper: &dyn Sleeper, mut attempt: F) -> Result<Value>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ResponseOutcome>,
{
    let mut retries = 0;

    loop {
        let outcome = attempt().await;

        if outcome.is_success() || !policy.is_transient(&outcome) || retries >= policy.retries {
            return into_result(outcome, retries);
        }

        retries += 1;
        let delay = policy.delay_for(retries);
        let code = outcome
            .retry_code()
            .map(|code| code.to_string())
            .unwrap_or_default();

        tracing::info!(
            retry = retries,
            max_retries = policy.retries,
            code = %code,
            delay = ?delay,
            "Retrying request"
        );
        metrics::record_retry(&code);

        sleeper.sleep(delay).await;
    }
}

fn into_result(outcome: ResponseOutcome, retries: u32) -> Result<Value> {
    let err = match outcome {
        ResponseOutcome::Success(value) => return Ok(value),
        ResponseOutcome::AuthFailure { body } => Error::Authentication { body, retries },
        ResponseOutcome::HttpError { status, body } => Error::Http { status, body, retries },
        ResponseOutcome::MalformedBody { body } => Error::MalformedResponse { body, retries },
        ResponseOutcome::NetworkError { code } if code == TIMEOUT_CODE => Error::Timeout { retries },
        ResponseOutcome::NetworkError { code } => Error::Network { code, retries },
    };

    tracing::warn!(error = %err, retries, "Request failed");
    Err(err)
}
