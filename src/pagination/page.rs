//! Decorated pages and lazy continuation links.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use url::Url;

use crate::api::client::ClientCore;
use crate::error::Result;
use crate::http::request::strip_api_key;
use crate::http::RequestTarget;

/// Field carrying a result element's self-reference URL.
pub const SELF_URL_FIELD: &str = "_url";

/// A parsed list response with continuation links attached.
#[derive(Debug, Clone)]
pub struct Page {
    payload: Value,
    results: Vec<Record>,
    next: Option<PageLink>,
    previous: Option<PageLink>,
}

impl Page {
    /// The response exactly as the server sent it.
    pub fn payload(&self) -> &Value {
        &self.payload
    }

    pub fn into_payload(self) -> Value {
        self.payload
    }

    pub fn results(&self) -> &[Record] {
        &self.results
    }

    /// Total result count, when the server reports one.
    pub fn count(&self) -> Option<u64> {
        self.payload.get("count").and_then(Value::as_u64)
    }

    /// Present iff the payload carried a `next` URL.
    pub fn next_page(&self) -> Option<&PageLink> {
        self.next.as_ref()
    }

    /// Present iff the payload carried a `previous` URL.
    pub fn previous_page(&self) -> Option<&PageLink> {
        self.previous.as_ref()
    }
}

/// One element of a page's `results`.
#[derive(Debug, Clone)]
pub struct Record {
    data: Value,
    details: Option<DetailLink>,
}

impl Record {
    pub fn data(&self) -> &Value {
        &self.data
    }

    pub fn into_data(self) -> Value {
        self.data
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Present iff the element carried a self-reference URL.
    pub fn details(&self) -> Option<&DetailLink> {
        self.details.as_ref()
    }
}

/// Lazy fetch of another page. Every `fetch` is a fresh request.
#[derive(Clone)]
pub struct PageLink {
    url: Url,
    core: Arc<ClientCore>,
}

impl PageLink {
    /// The URL that will be requested, `api_key` already removed.
    pub fn url(&self) -> &Url {
        &self.url
    }

    pub async fn fetch(&self) -> Result<Page> {
        let payload = self.core.get(&RequestTarget::reference(&self.url)).await?;
        Ok(decorate(payload, &self.core))
    }
}

/// Lazy fetch of a record's full details, returned as a plain object.
#[derive(Clone)]
pub struct DetailLink {
    url: Url,
    core: Arc<ClientCore>,
}

impl DetailLink {
    pub fn url(&self) -> &Url {
        &self.url
    }

    pub async fn fetch(&self) -> Result<Value> {
        self.core.get(&RequestTarget::reference(&self.url)).await
    }
}

impl fmt::Debug for PageLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PageLink").field(&self.url().as_str()).finish()
    }
}

impl fmt::Debug for DetailLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DetailLink").field(&self.url().as_str()).finish()
    }
}

/// Attach `next`/`previous`/`details` links to a payload. No network call.
pub(crate) fn decorate(payload: Value, core: &Arc<ClientCore>) -> Page {
    let next = reference(&payload, "next").map(|url| PageLink {
        url,
        core: Arc::clone(core),
    });
    let previous = reference(&payload, "previous").map(|url| PageLink {
        url,
        core: Arc::clone(core),
    });

    let results = payload
        .get("results")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .map(|item| Record {
                    details: reference(item, SELF_URL_FIELD).map(|url| DetailLink {
                        url,
                        core: Arc::clone(core),
                    }),
                    data: item.clone(),
                })
                .collect()
        })
        .unwrap_or_default();

    Page {
        payload,
        results,
        next,
        previous,
    }
}

/// Read a URL field, skipping null/absent values, non-strings and
/// unparseable URLs.
fn reference(value: &Value, field: &str) -> Option<Url> {
    let raw = match value.get(field)? {
        Value::Null => return None,
        Value::String(raw) => raw,
        other => {
            tracing::warn!(field, value = %other, "Ignoring non-string link");
            return None;
        }
    };
    match Url::parse(raw) {
        Ok(url) => Some(strip_api_key(&url)),
        Err(e) => {
            tracing::warn!(field, error = %e, "Ignoring unparseable link");
            None
        }
    }
}
