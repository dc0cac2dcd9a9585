//! Stateless resolution pipeline.
//!
//! Three independently invoked stages. Each one fetches exactly one
//! payload, locates the record it needs and materializes domain records.
//! Nothing is kept between calls; the variant chosen at search time travels
//! inside the encoded `id` strings the host hands back.
//!
//! # Architecture
//!
//! ```text
//! search(text, variant) ──► SearchResult { id = {slug, variant} }
//!                                     │
//! list_episodes(id) ◄─────────────────┘
//!        └──► EpisodeDetails { id = {slug, number, variant} }
//!                                     │
//! resolve_server(id) ◄────────────────┘
//!        └──► EpisodeServer { HLS, [m3u8] }
//! ```
//!
//! # Failure policy
//!
//! - **search** is advisory: every failure is logged and becomes `[]`.
//! - **list_episodes** and **resolve_server** surface a [`ProviderError`].

pub mod episodes;
pub mod search;
pub mod server;
pub mod urls;

pub use episodes::{extract_episodes, EpisodeContext};
pub use search::extract_results;
pub use server::{extract_server, manifest_url};
pub use urls::SiteUrls;

use crate::config::ProviderConfig;
use crate::error::{ProviderError, Result, ResultExt};
use crate::graph::Payload;
use crate::reference::{AnimeRef, EpisodeRef};
use crate::transport::{Fetch, HttpFetcher};
use crate::types::{EpisodeDetails, EpisodeInput, EpisodeServer, ProviderSettings, SearchQuery, SearchResult};

/// AnimeAV1 provider: configuration plus a fetch capability
#[derive(Debug, Clone)]
pub struct Provider<F = HttpFetcher> {
    config: ProviderConfig,
    fetcher: F,
}

impl Provider<HttpFetcher> {
    /// Provider over a reqwest client built from `config.http`
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config.http)?;
        Ok(Self { config, fetcher })
    }
}

impl<F: Fetch> Provider<F> {
    /// Provider over an arbitrary fetcher
    pub fn with_fetcher(config: ProviderConfig, fetcher: F) -> Self {
        Self { config, fetcher }
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Capabilities declared to the host
    pub fn settings(&self) -> ProviderSettings {
        ProviderSettings::default()
    }

    fn urls(&self) -> SiteUrls<'_> {
        SiteUrls::from_config(&self.config)
    }

    /// Search the catalog's first page
    ///
    /// Never fails: fetch and decode problems are logged and yield `[]`.
    pub async fn search(&self, query: &SearchQuery) -> Vec<SearchResult> {
        let outcome = async {
            let url = self.urls().catalog(query.filter_text())?;
            let payload = self.fetch_payload(&url).await?;
            Ok::<_, ProviderError>(extract_results(&payload, query.variant, &self.urls()))
        }
        .await;

        match outcome {
            Ok(results) => {
                tracing::info!("Search {:?} returned {} result(s)", query.filter_text(), results.len());
                results
            }
            Err(e) => {
                tracing::warn!("Search failed, returning no results: {}", e);
                Vec::new()
            }
        }
    }

    /// List episodes for an anime id (encoded reference or plain slug)
    pub async fn list_episodes(&self, anime_id: &str) -> Result<Vec<EpisodeDetails>> {
        let anime = AnimeRef::decode(anime_id);
        let urls = self.urls();

        let payload = self
            .fetch_payload(&urls.media_data(&anime.slug))
            .await
            .with_context(|| format!("Failed to list episodes of '{}'", anime.slug))?;

        let ctx = EpisodeContext {
            anime: &anime,
            urls: &urls,
            language: self.config.language,
        };
        let episodes = extract_episodes(&payload, &ctx)?;

        tracing::info!("Listed {} episode(s) of '{}' ({})", episodes.len(), anime.slug, anime.variant);
        Ok(episodes)
    }

    /// Resolve the HLS stream of an episode
    ///
    /// `_server` is accepted for host compatibility and ignored: HLS is the
    /// only server resolved.
    pub async fn resolve_server<'a>(
        &self,
        episode: impl Into<EpisodeInput<'a>>,
        _server: &str,
    ) -> Result<EpisodeServer> {
        let reference = EpisodeRef::decode(episode.into().id())?;
        let url = self.urls().episode_data(&reference.slug, reference.number);

        let payload = self.fetch_payload(&url).await.with_context(|| {
            format!("Failed to load episode {} of '{}'", reference.number, reference.slug)
        })?;

        extract_server(&payload, reference.variant)
    }

    /// The single fetch of a stage: GET, check status, decode
    async fn fetch_payload(&self, url: &str) -> Result<Payload> {
        let response = self.fetcher.fetch(url).await?;
        if !response.ok() {
            return Err(ProviderError::fetch(url, format!("HTTP {}", response.status)));
        }
        response.json()
    }
}
