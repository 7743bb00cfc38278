//! Outbound request construction.
//!
//! # Responsibilities
//! - Build the GET URL for an endpoint or a server-supplied reference
//! - Append a fresh anti-cache nonce on every build
//! - Carry the API key out-of-band in the `X-API-KEY` header
//!
//! # Design Decisions
//! - A `RequestSpec` is built fresh for every attempt, retries included
//! - `api_key` query parameters are stripped from references before reuse;
//!   the key never appears in a URL

use std::fmt;
use std::sync::Arc;

use rand::Rng;
use url::Url;

use crate::error::{Error, Result};

/// Header carrying the credential.
pub const API_KEY_HEADER: &str = "X-API-KEY";

/// Query parameter holding the anti-cache nonce.
pub const NONCE_PARAM: &str = "cheat-cache";

const API_KEY_PARAM: &str = "api_key";

/// API key for the directory service. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(Arc<str>);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(Error::validation("api_key", "must not be empty"));
        }
        Ok(Self(Arc::from(key)))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Where a request goes: a named endpoint with query options, or an opaque
/// URL handed out by the server (`next`, `previous`, `_url`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestTarget {
    Endpoint {
        path: String,
        query: Vec<(String, String)>,
    },
    Reference(Url),
}

impl RequestTarget {
    pub fn endpoint(path: &str, query: Vec<(String, String)>) -> Self {
        RequestTarget::Endpoint {
            path: path.to_string(),
            query,
        }
    }

    /// Capture a server-supplied URL, dropping any embedded `api_key`.
    pub fn reference(url: &Url) -> Self {
        RequestTarget::Reference(strip_api_key(url))
    }

    /// Parse and capture a server-supplied URL string.
    pub fn parse_reference(reference: &str) -> Result<Self> {
        let url = Url::parse(reference)
            .map_err(|e| Error::validation("url", format!("invalid reference '{}': {}", reference, e)))?;
        Ok(Self::reference(&url))
    }
}

/// A single GET attempt described as plain data.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    url: Url,
    nonce: String,
    api_key: ApiKey,
}

impl RequestSpec {
    /// Build a fresh spec for `target`, with a new nonce. Endpoint paths are
    /// resolved against `base`.
    pub fn build(target: &RequestTarget, base: &Url, api_key: &ApiKey) -> Self {
        let mut url = match target {
            RequestTarget::Endpoint { path, query } => {
                let mut url = base.clone();
                url.set_path(path);
                url.set_query(None);
                if !query.is_empty() {
                    url.query_pairs_mut().extend_pairs(query.iter());
                }
                url
            }
            RequestTarget::Reference(url) => strip_api_key(url),
        };

        let nonce = generate_nonce();
        url.query_pairs_mut().append_pair(NONCE_PARAM, &nonce);

        Self {
            url,
            nonce,
            api_key: api_key.clone(),
        }
    }

    pub fn method(&self) -> &'static str {
        "GET"
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn hostname(&self) -> Option<&str> {
        self.url.host_str()
    }

    pub fn path(&self) -> &str {
        self.url.path()
    }

    pub fn nonce(&self) -> &str {
        &self.nonce
    }

    /// Decoded query parameters, nonce included.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    pub fn headers(&self) -> Vec<(&'static str, &str)> {
        vec![
            (API_KEY_HEADER, self.api_key.expose()),
            ("Accept", "application/json"),
        ]
    }
}

/// Copy of `url` without `api_key` query parameters or fragment. A query
/// with no `api_key` is kept byte for byte.
pub(crate) fn strip_api_key(url: &Url) -> Url {
    if !url.query_pairs().any(|(key, _)| key == API_KEY_PARAM) {
        let mut kept = url.clone();
        kept.set_fragment(None);
        return kept;
    }

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != API_KEY_PARAM)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let mut stripped = url.clone();
    stripped.set_fragment(None);
    stripped.set_query(None);
    if !kept.is_empty() {
        stripped.query_pairs_mut().extend_pairs(kept);
    }
    stripped
}

fn generate_nonce() -> String {
    let bytes: [u8; 18] = rand::thread_rng().gen();
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
