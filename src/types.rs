//! Core data types for the AnimeAV1 provider
//!
//! This module contains the records handed to the host and the inputs the
//! host passes in. Records are plain values; the only state that survives a
//! call is the encoded reference stored in each record's `id`.
//!
//! # Main Types
//!
//! - [`SearchResult`] - A catalog hit; `id` encodes `{slug, variant}`
//! - [`EpisodeDetails`] - One episode; `id` encodes `{slug, number, variant}`
//! - [`EpisodeServer`] - The resolved stream server with its video sources
//! - [`VideoSource`] - One playable manifest URL
//!
//! Records serialize with the host's camelCase field names.

use crate::reference::Variant;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name of the only server the provider resolves
pub const HLS_SERVER: &str = "HLS";

/// A catalog search hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Encoded anime reference
    pub id: String,
    pub title: String,
    /// Canonical media page
    pub url: String,
    /// Cover image, when the media identifier resolved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Variant selected at search time
    pub sub_or_dub: Variant,
}

/// One episode of a title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeDetails {
    /// Encoded episode reference
    pub id: String,
    pub number: f64,
    pub title: String,
    /// Canonical episode page
    pub url: String,
    /// Backdrop image, when the media identifier resolved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Kind of manifest a video source points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoSourceType {
    #[default]
    M3u8,
}

/// A subtitle track attached to a video source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoSubtitle {
    pub url: String,
    pub language: String,
}

/// One playable source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoSource {
    pub url: String,
    #[serde(rename = "type")]
    pub source_type: VideoSourceType,
    pub quality: String,
    pub subtitles: Vec<VideoSubtitle>,
}

impl VideoSource {
    /// HLS manifest with automatic quality and no side-loaded subtitles
    pub fn hls(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            source_type: VideoSourceType::M3u8,
            quality: "auto".to_string(),
            subtitles: Vec::new(),
        }
    }
}

/// Resolved stream server for an episode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeServer {
    pub server: String,
    pub headers: BTreeMap<String, String>,
    pub video_sources: Vec<VideoSource>,
}

impl EpisodeServer {
    /// HLS server record for a single manifest
    pub fn hls(source: VideoSource) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Referer".to_string(), "null".to_string());
        Self {
            server: HLS_SERVER.to_string(),
            headers,
            video_sources: vec![source],
        }
    }
}

/// Catalog search input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    /// Free-text filter; blank means "browse the first catalog page"
    pub text: Option<String>,
    /// The only point where the caller chooses the variant
    pub variant: Variant,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            variant: Variant::Sub,
        }
    }

    /// Browse query without a text filter
    pub fn browse() -> Self {
        Self::default()
    }

    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    /// Set the variant from the host's `dub` flag
    pub fn dub(self, dub: bool) -> Self {
        self.with_variant(Variant::from_dub(dub))
    }

    /// Trimmed text filter, `None` when blank
    pub fn filter_text(&self) -> Option<&str> {
        self.text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

/// What the host passes to the server lookup: an id, or the episode itself
#[derive(Debug, Clone, Copy)]
pub enum EpisodeInput<'a> {
    Id(&'a str),
    Episode(&'a EpisodeDetails),
}

impl<'a> EpisodeInput<'a> {
    pub fn id(&self) -> &'a str {
        match *self {
            EpisodeInput::Id(id) => id,
            EpisodeInput::Episode(episode) => &episode.id,
        }
    }
}

impl<'a> From<&'a str> for EpisodeInput<'a> {
    fn from(id: &'a str) -> Self {
        EpisodeInput::Id(id)
    }
}

impl<'a> From<&'a String> for EpisodeInput<'a> {
    fn from(id: &'a String) -> Self {
        EpisodeInput::Id(id)
    }
}

impl<'a> From<&'a EpisodeDetails> for EpisodeInput<'a> {
    fn from(episode: &'a EpisodeDetails) -> Self {
        EpisodeInput::Episode(episode)
    }
}

/// Static capabilities the provider declares to its host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSettings {
    pub episode_servers: Vec<String>,
    pub supports_dub: bool,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            episode_servers: vec![HLS_SERVER.to_string()],
            supports_dub: true,
        }
    }
}
