//! Single-attempt HTTP transport.
//!
//! # Responsibilities
//! - Issue one GET with the request's headers
//! - Enforce the client-side timeout over the whole exchange
//! - Buffer the full body before classification
//! - Map connection failures to platform-style error codes
//!
//! # Design Decisions
//! - No retries and no caching here; that is the retry engine's job
//! - Ordinary HTTP failures come back as `ResponseOutcome` values

use std::error::Error as StdError;
use std::io;
use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::error::Result;
use crate::http::request::RequestSpec;
use crate::http::response::{classify, ResponseOutcome, TIMEOUT_CODE};
use crate::observability::metrics;
use crate::resilience::timeouts::with_timeout;

/// Executes a single request attempt.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, spec: RequestSpec, timeout: Duration) -> ResponseOutcome;
}

/// `Transport` backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Reuse `agent` when given, otherwise build a dedicated client from
    /// [`client_builder`].
    pub fn new(agent: Option<reqwest::Client>) -> Result<Self> {
        let client = match agent {
            Some(client) => client,
            None => client_builder().build()?,
        };
        Ok(Self { client })
    }
}

/// Builder for a client suitable as a connection-reuse handle.
///
/// Redirects are never followed: a 3xx is an ordinary non-200 status, and
/// following it would forward the `X-API-KEY` header to another host.
pub fn client_builder() -> reqwest::ClientBuilder {
    reqwest::Client::builder().redirect(reqwest::redirect::Policy::none())
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, spec: RequestSpec, timeout: Duration) -> ResponseOutcome {
        let start = Instant::now();
        let mut request = self.client.get(spec.url().clone());
        for (name, value) in spec.headers() {
            request = request.header(name, value);
        }

        tracing::debug!(
            method = spec.method(),
            host = spec.hostname().unwrap_or_default(),
            path = %spec.path(),
            timeout_ms = timeout.as_millis() as u64,
            "Sending request"
        );

        let exchange = async {
            let response = request.send().await?;
            let status = response.status().as_u16();
            let bytes = response.bytes().await?;
            Ok::<_, reqwest::Error>((status, String::from_utf8_lossy(&bytes).into_owned()))
        };

        let outcome = match with_timeout(timeout, exchange).await {
            Some(Ok((status, body))) => classify(status, body),
            Some(Err(e)) => {
                let code = network_code(&e);
                tracing::debug!(error = %e, code, "Transport error");
                ResponseOutcome::network(code)
            }
            None => ResponseOutcome::network(TIMEOUT_CODE),
        };

        metrics::record_attempt(outcome.label(), start);
        outcome
    }
}

/// Map a reqwest failure to a Node-style error identifier.
fn network_code(err: &reqwest::Error) -> &'static str {
    if err.is_timeout() {
        return TIMEOUT_CODE;
    }

    let mut source = StdError::source(err);
    while let Some(inner) = source {
        if let Some(io_err) = inner.downcast_ref::<io::Error>() {
            if let Some(code) = io_code(io_err.kind()) {
                return code;
            }
        }
        // hyper-util's connector reports resolver failures as `dns error: ...`
        // and exposes no typed variant for them.
        if is_dns_error(inner) {
            return "ENOTFOUND";
        }
        source = inner.source();
    }

    if err.is_connect() {
        "ECONNREFUSED"
    } else if err.is_body() || err.is_decode() {
        "ECONNRESET"
    } else {
        "EREQUEST"
    }
}

fn is_dns_error(err: &(dyn StdError + 'static)) -> bool {
    err.to_string().starts_with("dns error")
}

fn io_code(kind: io::ErrorKind) -> Option<&'static str> {
    match kind {
        io::ErrorKind::ConnectionRefused => Some("ECONNREFUSED"),
        io::ErrorKind::ConnectionReset
        | io::ErrorKind::ConnectionAborted
        | io::ErrorKind::BrokenPipe
        | io::ErrorKind::UnexpectedEof => Some("ECONNRESET"),
        io::ErrorKind::AddrInUse => Some("EADDRINUSE"),
        io::ErrorKind::TimedOut => Some(TIMEOUT_CODE),
        _ => None,
    }
}
