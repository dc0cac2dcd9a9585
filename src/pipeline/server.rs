//! Stream server extraction
//!
//! The episode payload carries a record with an `embeds` pointer to a map
//! keyed by uppercase category (`SUB`, `DUB`). Each category points at an
//! array of server pointers; a server record has `server` and `url`
//! pointers. The first server named `HLS` wins.

use crate::error::{ProviderError, Result};
use crate::graph::{locate, HasEmbeds, Payload, Pool, Record};
use crate::reference::Variant;
use crate::types::{EpisodeServer, VideoSource, HLS_SERVER};

/// Select the HLS stream for `variant` from an episode payload
pub fn extract_server(payload: &Payload, variant: Variant) -> Result<EpisodeServer> {
    let root = locate(payload, &HasEmbeds)
        .ok_or_else(|| ProviderError::RecordNotFound("episode embeds".to_string()))?;

    let pool = root.pool;
    let category = variant.category();
    let list = pool
        .field(root.record, "embeds")
        .ok()
        .and_then(|cell| cell.as_record())
        .and_then(|embeds| pool.field_pointer(embeds, category).ok())
        .ok_or_else(|| ProviderError::NoContentForVariant(category.to_string()))?;

    let servers = pool
        .expect_array(list)
        .map_err(|e| ProviderError::MalformedPayload(format!("{} server list: {}", category, e)))?;

    let manifest = pool
        .resolve_all(servers)
        .filter_map(|cell| cell.ok().and_then(|c| c.as_record()))
        .filter_map(|server| server_entry(pool, server))
        .find(|(name, _)| *name == HLS_SERVER)
        .map(|(_, url)| manifest_url(url))
        .ok_or(ProviderError::StreamNotFound(variant))?;

    tracing::debug!("Selected {} stream {}", variant, manifest);
    Ok(EpisodeServer::hls(VideoSource::hls(manifest)))
}

fn server_entry<'a>(pool: &'a Pool, server: &'a Record) -> Option<(&'a str, &'a str)> {
    let name = pool.field(server, "server").ok()?.as_present_str()?;
    let url = pool.field(server, "url").ok()?.as_present_str()?;
    Some((name, url))
}

/// Player URL to manifest URL: first `/play/` segment becomes `/m3u8/`
pub fn manifest_url(player_url: &str) -> String {
    player_url.replacen("/play/", "/m3u8/", 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn episode(pool: &str) -> Payload {
        Payload::from_json(&format!(
            r#"{{"type": "data", "nodes": [{{"type": "data", "data": [{{"media": 1}}, 2]}}, {{"type": "data", "data": {}}}]}}"#,
            pool
        ))
        .unwrap()
    }

    #[test]
    fn test_first_hls_wins() {
        let payload = episode(
            r#"[{"embeds": 1}, {"SUB": 2}, [3, 6, 8],
                {"server": 4, "url": 5}, "OTHER", "https://x/play/zzz",
                {"server": 9, "url": 7}, "https://x/play/abc",
                {"server": 9, "url": 10}, "HLS", "https://x/play/late"]"#,
        );

        let server = extract_server(&payload, Variant::Sub).unwrap();
        assert_eq!(server.server, "HLS");
        assert_eq!(server.headers.get("Referer").map(String::as_str), Some("null"));
        assert_eq!(server.video_sources.len(), 1);
        assert_eq!(server.video_sources[0].url, "https://x/m3u8/abc");
    }

    #[test]
    fn test_skips_unresolvable_servers() {
        let payload = episode(
            r#"[{"embeds": 1}, {"DUB": 2}, [42, 3, 5],
                {"server": 4}, "HLS",
                {"server": 4, "url": 6}, "https://x/play/dub"]"#,
        );
        let server = extract_server(&payload, Variant::Dub).unwrap();
        assert_eq!(server.video_sources[0].url, "https://x/m3u8/dub");
    }

    #[test]
    fn test_missing_category() {
        let payload = episode(r#"[{"embeds": 1}, {"SUB": 2}, []]"#);
        let err = extract_server(&payload, Variant::Dub).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoContentForVariant);
        assert_eq!(err.to_string(), "No content for DUB");
    }

    #[test]
    fn test_category_not_a_pointer() {
        let payload = episode(r#"[{"embeds": 1}, {"SUB": "x"}]"#);
        let err = extract_server(&payload, Variant::Sub).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoContentForVariant);
    }

    #[test]
    fn test_no_hls_server() {
        let payload = episode(r#"[{"embeds": 1}, {"SUB": 2}, [3], {"server": 4, "url": 5}, "MEGA", "https://m/x"]"#);
        let err = extract_server(&payload, Variant::Sub).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StreamNotFound);
        assert!(err.to_string().contains("sub"));
    }

    #[test]
    fn test_no_embeds_record() {
        let payload = episode(r#"[{"episode": 1}, 3]"#);
        let err = extract_server(&payload, Variant::Sub).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RecordNotFound);
    }

    #[test]
    fn test_server_list_not_an_array() {
        let payload = episode(r#"[{"embeds": 1}, {"SUB": 2}, "x"]"#);
        let err = extract_server(&payload, Variant::Sub).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedPayload);
    }

    #[test]
    fn test_manifest_url_rewrites_first_segment() {
        assert_eq!(manifest_url("https://x/play/abc"), "https://x/m3u8/abc");
        assert_eq!(manifest_url("https://x/embed/abc"), "https://x/embed/abc");
    }
}
