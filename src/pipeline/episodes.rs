//! Episode list extraction
//!
//! The media payload carries a descriptor record with a `slug` pointer equal
//! to the requested slug and an `episodes` pointer to an array of episode
//! pointers. Several nodes may carry such a record; the first one in scan
//! order is authoritative.

use super::urls::SiteUrls;
use crate::error::{ProviderError, Result};
use crate::graph::{locate, MediaWithSlug, Payload, Pool, Record};
use crate::i18n::Language;
use crate::reference::{AnimeRef, EpisodeRef};
use crate::types::EpisodeDetails;

/// Everything an episode record needs besides the pool itself
#[derive(Debug, Clone, Copy)]
pub struct EpisodeContext<'a> {
    pub anime: &'a AnimeRef,
    pub urls: &'a SiteUrls<'a>,
    pub language: Language,
}

/// Materialize the episode list for `ctx.anime.slug`
///
/// Episode cells that are not records are skipped, but still consume their
/// position for number fallback.
pub fn extract_episodes(payload: &Payload, ctx: &EpisodeContext<'_>) -> Result<Vec<EpisodeDetails>> {
    let slug = ctx.anime.slug.as_str();
    let media = locate(payload, &MediaWithSlug { slug })
        .ok_or_else(|| ProviderError::RecordNotFound(format!("media '{}'", slug)))?;

    let pool = media.pool;
    let episodes = pool
        .field(media.record, "episodes")
        .map_err(|e| ProviderError::MalformedPayload(format!("episode list: {}", e)))?
        .as_array()
        .ok_or_else(|| ProviderError::MalformedPayload("episode list is not an array".to_string()))?;

    let image = pool
        .field(media.record, "id")
        .ok()
        .and_then(|cell| cell.as_identifier())
        .map(|id| ctx.urls.backdrop(&id));

    let details = episodes
        .iter()
        .enumerate()
        .filter_map(|(i, slot)| {
            let episode = pool.deref(slot).ok().and_then(|cell| cell.as_record());
            if episode.is_none() {
                tracing::debug!("Skipping unresolvable episode slot {} of '{}'", i, slug);
            }
            episode.map(|record| (i, record))
        })
        .map(|(i, record)| {
            let number = episode_number(pool, record, i);
            let title = episode_title(pool, record)
                .unwrap_or_else(|| ctx.language.episode_title(number));

            EpisodeDetails {
                id: EpisodeRef::new(slug, number, ctx.anime.variant).encode(),
                number,
                title,
                url: ctx.urls.episode_page(slug, number),
                image: image.clone(),
            }
        })
        .collect();

    Ok(details)
}

/// `number` through one pointer, else the 1-based position
fn episode_number(pool: &Pool, episode: &Record, index: usize) -> f64 {
    pool.field(episode, "number")
        .ok()
        .and_then(|cell| cell.as_number())
        .filter(|n| n.is_finite())
        .unwrap_or((index + 1) as f64)
}

/// `title` inline or through one pointer
fn episode_title(pool: &Pool, episode: &Record) -> Option<String> {
    pool.field_or_inline(episode, "title")
        .ok()
        .and_then(|cell| cell.as_present_str())
        .map(str::to_string)
}
