//! Transport seam
//!
//! Stages see the network only through [`Fetch`]: one GET per call, a
//! status and a body. [`HttpFetcher`] is the production implementation and
//! [`FixtureFetcher`] serves canned payloads for tests and offline runs.
//!
//! No implementation retries or caches. A timeout, if any, is whatever the
//! implementation enforces.

pub mod fixture;
pub mod http;

pub use fixture::FixtureFetcher;
pub use http::HttpFetcher;

use crate::error::{ProviderError, Result};
use crate::graph::Payload;
use async_trait::async_trait;

/// Raw response to a page-data request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 200 response with the given body
    pub fn ok_with(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    /// Whether the status is 2xx
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as a page-data payload
    pub fn json(&self) -> Result<Payload> {
        Payload::from_json(&self.body)
            .map_err(|e| ProviderError::MalformedPayload(format!("invalid page data: {}", e)))
    }
}

/// Single-request fetch capability
///
/// Implementations must be shareable across tasks; a stage issues exactly
/// one call and awaits it before doing anything else.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Fetch: Send + Sync {
    /// GET `url`. Transport errors map to [`ProviderError::FetchFailed`];
    /// non-2xx statuses are returned, not raised.
    async fn fetch(&self, url: &str) -> Result<FetchResponse>;
}

#[async_trait]
impl<F: Fetch + ?Sized> Fetch for std::sync::Arc<F> {
    async fn fetch(&self, url: &str) -> Result<FetchResponse> {
        (**self).fetch(url).await
    }
}
