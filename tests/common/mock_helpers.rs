//! Fetcher and provider construction helpers

use super::builders::{catalog_page, episode_page, media_page};
use animeav1_rs::{FixtureFetcher, Provider, ProviderConfig};

pub const BASE: &str = "https://animeav1.com";

pub fn catalog_url(search: Option<&str>) -> String {
    match search {
        Some(text) => format!("{}/catalogo/__data.json?page=1&search={}", BASE, text),
        None => format!("{}/catalogo/__data.json?page=1", BASE),
    }
}

pub fn media_url(slug: &str) -> String {
    format!("{}/media/{}/__data.json", BASE, slug)
}

pub fn episode_url(slug: &str, number: u32) -> String {
    format!("{}/media/{}/{}/__data.json", BASE, slug, number)
}

/// A small site: one title with two episodes, SUB and DUB streams for episode 1
pub fn one_piece_site() -> FixtureFetcher {
    FixtureFetcher::new()
        .with_json(
            catalog_url(Some("one")),
            catalog_page(&[(21, "One Piece", "one-piece"), (22, "One Punch Man", "one-punch-man")]),
        )
        .with_json(
            media_url("one-piece"),
            media_page(21, "one-piece", &[(1.0, "Romance Dawn"), (2.0, "")]),
        )
        .with_json(
            episode_url("one-piece", 1),
            episode_page(&[
                (
                    "SUB",
                    &[("MP4Upload", "https://mp4/1"), ("HLS", "https://player.example/play/sub-1")],
                ),
                ("DUB", &[("HLS", "https://player.example/play/dub-1")]),
            ]),
        )
        .with_json(
            episode_url("one-piece", 2),
            episode_page(&[("SUB", &[("HLS", "https://player.example/play/sub-2")])]),
        )
}

/// Provider with default config over `fetcher`
pub fn provider_with(fetcher: FixtureFetcher) -> Provider<FixtureFetcher> {
    Provider::with_fetcher(ProviderConfig::default(), fetcher)
}
