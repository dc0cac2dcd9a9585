//! Catalog search extraction
//!
//! The catalog payload's search node starts with a root descriptor whose
//! `results` field points at an array of candidate pointers. Each candidate
//! is a record with `id`, `title` and `slug` pointers into the same pool.

use super::urls::SiteUrls;
use crate::graph::{locate, Payload, Pool, Record, SearchRoot};
use crate::reference::{AnimeRef, Variant};
use crate::types::SearchResult;

/// Materialize search results from a catalog payload
///
/// Candidates without a resolvable title or slug are dropped. A payload
/// without a search node yields no results.
pub fn extract_results(
    payload: &Payload,
    variant: Variant,
    urls: &SiteUrls<'_>,
) -> Vec<SearchResult> {
    let Some(root) = locate(payload, &SearchRoot) else {
        tracing::debug!("No search node in catalog payload");
        return Vec::new();
    };

    let pool = root.pool;
    let Some(candidates) = pool
        .field(root.record, "results")
        .ok()
        .and_then(|cell| cell.as_array())
    else {
        return Vec::new();
    };

    pool.resolve_all(candidates)
        .filter_map(|cell| cell.ok().and_then(|c| c.as_record()))
        .filter_map(|candidate| materialize(pool, candidate, variant, urls))
        .collect()
}

fn materialize(
    pool: &Pool,
    candidate: &Record,
    variant: Variant,
    urls: &SiteUrls<'_>,
) -> Option<SearchResult> {
    let title = pool.field(candidate, "title").ok()?.as_present_str()?;
    let slug = pool.field(candidate, "slug").ok()?.as_present_str()?;
    let image = pool
        .field(candidate, "id")
        .ok()
        .and_then(|cell| cell.as_identifier())
        .map(|id| urls.cover(&id));

    Some(SearchResult {
        id: AnimeRef::new(slug, variant).encode(),
        title: title.to_string(),
        url: urls.media_page(slug),
        image,
        sub_or_dub: variant,
    })
}
