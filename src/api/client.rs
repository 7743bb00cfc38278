//! Directory service client.
//!
//! # Responsibilities
//! - Own the API key, configuration, transport and retry policy
//! - Validate query options before any network call
//! - Run every request through the retry engine
//! - Hand back decorated pages
//!
//! # Design Decisions
//! - Everything behind the client is immutable and shared via `Arc`, so
//!   clones and concurrent calls need no locking
//! - Transport and sleeper are trait objects so tests can script outcomes
//!   and record backoff delays

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};
use url::Url;

use crate::api::query::{GroupQuery, Query, QuerySchema, SkillQuery, UserQuery};
use crate::config::{validate_config, ClientConfig};
use crate::error::{Error, Result};
use crate::http::{ApiKey, ReqwestTransport, RequestSpec, RequestTarget, Transport};
use crate::pagination::{decorate, Page};
use crate::resilience::{retry, RetryPolicy, Sleeper, TokioSleeper};

/// State shared by a client and every page or link it hands out.
pub(crate) struct ClientCore {
    api_key: ApiKey,
    config: ClientConfig,
    base_url: Url,
    policy: RetryPolicy,
    transport: Arc<dyn Transport>,
    sleeper: Arc<dyn Sleeper>,
}

impl ClientCore {
    /// One logical GET: as many attempts as the retry policy allows, each
    /// with a freshly built request.
    pub(crate) async fn get(&self, target: &RequestTarget) -> Result<Value> {
        let core = self;
        let timeout = self.config.timeout();

        retry(&self.policy, self.sleeper.as_ref(), move || {
            let spec = RequestSpec::build(target, &core.base_url, &core.api_key);
            core.transport.send(spec, timeout)
        })
        .await
    }
}

/// Client for the users/groups/skills directory API.
///
/// Cheap to clone; clones share configuration and connection handle.
#[derive(Clone)]
pub struct MozilliansClient {
    core: Arc<ClientCore>,
}

impl MozilliansClient {
    /// Create a client using reqwest and the tokio timer.
    pub fn new(api_key: impl Into<String>, config: ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(config.agent.clone())?;
        Self::with_parts(api_key, config, Arc::new(transport), Arc::new(TokioSleeper))
    }

    /// Create a client with an explicit transport and sleeper.
    pub fn with_parts(
        api_key: impl Into<String>,
        config: ClientConfig,
        transport: Arc<dyn Transport>,
        sleeper: Arc<dyn Sleeper>,
    ) -> Result<Self> {
        let api_key = ApiKey::new(api_key)?;
        validate_config(&config).map_err(Error::Validation)?;
        let base_url = config.base_url().map_err(|e| Error::Validation(vec![e]))?;
        let policy = RetryPolicy::from_config(&config);

        tracing::debug!(
            base_url = %base_url,
            timeout_ms = config.timeout_ms,
            retries = config.retries,
            "Client initialized"
        );

        Ok(Self {
            core: Arc::new(ClientCore {
                api_key,
                config,
                base_url,
                policy,
                transport,
                sleeper,
            }),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.core.config
    }

    /// Get users. Results carry `details()` links; the page carries
    /// `next_page()` / `previous_page()` when the server reports them.
    pub async fn users(&self, query: &UserQuery) -> Result<Page> {
        self.search(query).await
    }

    /// Get groups.
    pub async fn groups(&self, query: &GroupQuery) -> Result<Page> {
        self.search(query).await
    }

    /// Get skills.
    pub async fn skills(&self, query: &SkillQuery) -> Result<Page> {
        self.search(query).await
    }

    /// Run any typed query against its endpoint.
    pub async fn search<Q: Query>(&self, query: &Q) -> Result<Page> {
        let options = query.to_options()?;
        self.query(Q::SCHEMA, &options).await
    }

    /// Run a dynamically built query; options are validated against `schema`
    /// before anything is sent.
    pub async fn query(&self, schema: &QuerySchema, options: &Map<String, Value>) -> Result<Page> {
        let pairs = schema.validate(options)?;
        let target = RequestTarget::endpoint(schema.path, pairs);

        tracing::debug!(endpoint = schema.name, options = options.len(), "Querying");
        let payload = self.core.get(&target).await?;
        Ok(decorate(payload, &self.core))
    }

    /// Fetch a server-supplied URL as a plain object (e.g. a record's `_url`).
    pub async fn fetch_reference(&self, reference: &str) -> Result<Value> {
        let target = RequestTarget::parse_reference(reference)?;
        self.core.get(&target).await
    }

    /// Fetch a server-supplied page URL (e.g. a `next` link) and decorate it.
    pub async fn fetch_page(&self, reference: &str) -> Result<Page> {
        let target = RequestTarget::parse_reference(reference)?;
        let payload = self.core.get(&target).await?;
        Ok(decorate(payload, &self.core))
    }

    /// Attach continuation links to a payload without any network call.
    pub fn decorate(&self, payload: Value) -> Page {
        decorate(payload, &self.core)
    }
}

impl fmt::Debug for MozilliansClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MozilliansClient")
            .field("base_url", &self.core.base_url.as_str())
            .field("timeout_ms", &self.core.config.timeout_ms)
            .field("retries", &self.core.policy.retries)
            .finish()
    }
}
