//! # AnimeAV1-RS: catalog provider for a graph-encoded anime site
//!
//! Extracts search results, episode lists and HLS stream URLs from a site
//! that serializes its page data as flattened, pointer-based graphs rather
//! than nested JSON.
//!
//! ## Architecture
//!
//! - **Graph**: pool resolver and node locator over `__data.json` payloads
//! - **Reference**: compact identifiers that carry `{slug, variant[, number]}`
//!   across otherwise stateless calls
//! - **Pipeline**: the search, episode list and server stages
//! - **Transport**: the single-fetch capability, over reqwest or fixtures
//!
//! ## Configuration
//!
//! Provider settings are read from `animeav1-rs/config.toml` in the
//! platform config directory, with `ANIMEAV1_*` environment overrides. See
//! [`config`].
//!
//! ## Example
//!
//! ```ignore
//! use animeav1_rs::{Provider, ProviderConfig, SearchQuery};
//!
//! #[tokio::main]
//! async fn main() -> animeav1_rs::Result<()> {
//!     let provider = Provider::new(ProviderConfig::load_or_default(None))?;
//!
//!     let hits = provider.search(&SearchQuery::new("one piece").dub(true)).await;
//!     let episodes = provider.list_episodes(&hits[0].id).await?;
//!     let server = provider.resolve_server(&episodes[0], "HLS").await?;
//!
//!     println!("{}", server.video_sources[0].url);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod graph;
pub mod i18n;
pub mod pipeline;
pub mod reference;
pub mod transport;
pub mod types;

pub use config::ProviderConfig;
pub use error::{ErrorKind, ProviderError, Result};
pub use i18n::Language;
pub use pipeline::Provider;
pub use reference::{AnimeRef, EpisodeRef, Variant};
pub use transport::{Fetch, FetchResponse, FixtureFetcher, HttpFetcher};
pub use types::{
    EpisodeDetails, EpisodeInput, EpisodeServer, ProviderSettings, SearchQuery, SearchResult,
    VideoSource,
};
