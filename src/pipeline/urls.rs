//! Site URL templates
//!
//! Every URL a stage requests or emits is built here from the configured
//! origins. Origins are stored without a trailing slash.

use crate::config::ProviderConfig;
use crate::error::{ProviderError, Result};
use reqwest::Url;

/// URL builder bound to one site and CDN origin
#[derive(Debug, Clone, Copy)]
pub struct SiteUrls<'a> {
    base: &'a str,
    cdn: &'a str,
}

impl<'a> SiteUrls<'a> {
    pub const fn new(base: &'a str, cdn: &'a str) -> Self {
        Self { base, cdn }
    }

    pub fn from_config(config: &'a ProviderConfig) -> Self {
        Self::new(&config.base_url, &config.cdn_url)
    }

    /// `{base}/catalogo/__data.json?page=1[&search={text}]`
    pub fn catalog(&self, text: Option<&str>) -> Result<String> {
        let endpoint = format!("{}/catalogo/__data.json", self.base);
        let mut params = vec![("page", "1")];
        if let Some(text) = text {
            params.push(("search", text));
        }
        Url::parse_with_params(&endpoint, &params)
            .map(String::from)
            .map_err(|e| ProviderError::Config(format!("bad catalog URL '{}': {}", endpoint, e)))
    }

    /// `{base}/media/{slug}`
    pub fn media_page(&self, slug: &str) -> String {
        format!("{}/media/{}", self.base, slug)
    }

    /// `{base}/media/{slug}/__data.json`
    pub fn media_data(&self, slug: &str) -> String {
        format!("{}/media/{}/__data.json", self.base, slug)
    }

    /// `{base}/media/{slug}/{number}`
    pub fn episode_page(&self, slug: &str, number: f64) -> String {
        format!("{}/media/{}/{}", self.base, slug, number)
    }

    /// `{base}/media/{slug}/{number}/__data.json`
    pub fn episode_data(&self, slug: &str, number: f64) -> String {
        format!("{}/media/{}/{}/__data.json", self.base, slug, number)
    }

    /// `{cdn}/covers/{id}.jpg`
    pub fn cover(&self, id: &str) -> String {
        format!("{}/covers/{}.jpg", self.cdn, id)
    }

    /// `{cdn}/backdrops/{id}.jpg`
    pub fn backdrop(&self, id: &str) -> String {
        format!("{}/backdrops/{}.jpg", self.cdn, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URLS: SiteUrls<'static> = SiteUrls {
        base: "https://animeav1.com",
        cdn: "https://cdn.animeav1.com",
    };

    #[test]
    fn test_catalog_url() {
        assert_eq!(
            URLS.catalog(None).unwrap(),
            "https://animeav1.com/catalogo/__data.json?page=1"
        );
        assert_eq!(
            URLS.catalog(Some("one piece")).unwrap(),
            "https://animeav1.com/catalogo/__data.json?page=1&search=one+piece"
        );
    }

    #[test]
    fn test_media_and_episode_urls() {
        assert_eq!(
            URLS.media_data("one-piece"),
            "https://animeav1.com/media/one-piece/__data.json"
        );
        assert_eq!(URLS.media_page("one-piece"), "https://animeav1.com/media/one-piece");
        assert_eq!(
            URLS.episode_data("one-piece", 12.0),
            "https://animeav1.com/media/one-piece/12/__data.json"
        );
        assert_eq!(
            URLS.episode_page("one-piece", 12.5),
            "https://animeav1.com/media/one-piece/12.5"
        );
    }

    #[test]
    fn test_asset_urls() {
        assert_eq!(URLS.cover("42"), "https://cdn.animeav1.com/covers/42.jpg");
        assert_eq!(URLS.backdrop("42"), "https://cdn.animeav1.com/backdrops/42.jpg");
    }

    #[test]
    fn test_from_config() {
        let config = ProviderConfig::default();
        let urls = SiteUrls::from_config(&config);
        assert_eq!(urls.media_page("x"), "https://animeav1.com/media/x");
    }
}
