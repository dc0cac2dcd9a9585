//! In-memory fetcher
//!
//! Serves canned responses keyed by exact URL and records every URL it was
//! asked for, so tests can assert both what a stage requested and how many
//! times. Unknown URLs answer 404.
//!
//! # Example
//!
//! ```ignore
//! use animeav1_rs::transport::FixtureFetcher;
//!
//! let fetcher = FixtureFetcher::new()
//!     .with_json("https://animeav1.com/media/one-piece/__data.json", body);
//! let provider = Provider::with_fetcher(config, fetcher.clone());
//! provider.list_episodes("one-piece").await?;
//! assert_eq!(fetcher.requests().len(), 1);
//! ```

use super::{Fetch, FetchResponse};
use crate::error::{ProviderError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct FixtureState {
    routes: HashMap<String, FetchResponse>,
    requests: Vec<String>,
}

/// Fetcher backed by a URL-to-response table
///
/// Clones share the same table and request log.
#[derive(Debug, Clone, Default)]
pub struct FixtureFetcher {
    state: Arc<Mutex<FixtureState>>,
}

impl FixtureFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `response` for `url`
    pub fn with_response(self, url: impl Into<String>, response: FetchResponse) -> Self {
        self.insert(url, response);
        self
    }

    /// Serve a 200 with `body` for `url`
    pub fn with_json(self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.with_response(url, FetchResponse::ok_with(body))
    }

    /// Serve a bare status for `url`
    pub fn with_status(self, url: impl Into<String>, status: u16) -> Self {
        self.with_response(url, FetchResponse::new(status, ""))
    }

    /// Serve the contents of `path` for `url`
    pub fn with_file(self, url: impl Into<String>, path: impl AsRef<Path>) -> Result<Self> {
        let body = std::fs::read_to_string(path.as_ref()).map_err(ProviderError::from)?;
        Ok(self.with_json(url, body))
    }

    pub fn insert(&self, url: impl Into<String>, response: FetchResponse) {
        if let Ok(mut state) = self.state.lock() {
            state.routes.insert(url.into(), response);
        }
    }

    /// URLs requested so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.state
            .lock()
            .map(|state| state.requests.clone())
            .unwrap_or_default()
    }

    pub fn clear_requests(&self) {
        if let Ok(mut state) = self.state.lock() {
            state.requests.clear();
        }
    }
}

#[async_trait]
impl Fetch for FixtureFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchResponse> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| ProviderError::fetch(url, "fixture table poisoned"))?;

        state.requests.push(url.to_string());
        Ok(state
            .routes
            .get(url)
            .cloned()
            .unwrap_or_else(|| FetchResponse::new(404, "")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_serves_routes_and_records_requests() {
        let fetcher = FixtureFetcher::new()
            .with_json("https://x/a", "{}")
            .with_status("https://x/b", 500);

        assert_eq!(fetcher.fetch("https://x/a").await.unwrap().status, 200);
        assert_eq!(fetcher.fetch("https://x/b").await.unwrap().status, 500);
        assert_eq!(fetcher.fetch("https://x/c").await.unwrap().status, 404);

        assert_eq!(
            fetcher.requests(),
            vec!["https://x/a", "https://x/b", "https://x/c"]
        );
    }

    #[tokio::test]
    async fn test_clones_share_log() {
        let fetcher = FixtureFetcher::new();
        let clone = fetcher.clone();
        clone.fetch("https://x/a").await.unwrap();
        assert_eq!(fetcher.requests().len(), 1);

        fetcher.clear_requests();
        assert!(clone.requests().is_empty());
    }

    #[test]
    fn test_with_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.json");
        std::fs::write(&path, r#"{"nodes": []}"#).unwrap();

        let fetcher = FixtureFetcher::new().with_file("https://x/p", &path).unwrap();
        assert!(fetcher.requests().is_empty());
        assert!(FixtureFetcher::new().with_file("https://x/p", dir.path().join("no")).is_err());
    }
}
