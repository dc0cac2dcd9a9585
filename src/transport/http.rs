//! reqwest-backed fetcher

use super::{Fetch, FetchResponse};
use crate::config::HttpSettings;
use crate::error::{ProviderError, Result};
use async_trait::async_trait;
use reqwest::Client;

/// Production fetcher over a shared reqwest [`Client`]
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a client with the configured timeout and User-Agent
    pub fn new(settings: &HttpSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.timeout())
            .user_agent(settings.user_agent.as_str())
            .build()
            .map_err(|e| ProviderError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Wrap an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchResponse> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ProviderError::fetch(url, e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::fetch(url, format!("failed to read body: {}", e)))?;

        tracing::trace!("{} -> {} ({} bytes)", url, status, body.len());
        Ok(FetchResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_builds_from_default_settings() {
        assert!(HttpFetcher::new(&HttpSettings::default()).is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_fetch_failure() {
        let settings = HttpSettings {
            timeout_secs: 2,
            ..Default::default()
        };
        let fetcher = HttpFetcher::new(&settings).unwrap();

        // Port 9 (discard) on loopback is closed in test environments
        let err = fetcher.fetch("http://127.0.0.1:9/__data.json").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FetchFailed);
    }
}
