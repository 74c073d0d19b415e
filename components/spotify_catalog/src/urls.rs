// components/spotify_catalog/src/urls.rs
//! Classification of Spotify links and URIs.
//!
//! Matching is substring based rather than full URL parsing, so inputs
//! with surrounding whitespace or tracking parameters still classify.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ID_PATTERN: Regex =
        Regex::new(r"spotify\.com/(?:track|playlist|album)/([a-zA-Z0-9]+)").unwrap();
}

/// True for any Spotify link or `spotify:` URI
pub fn is_spotify_url(s: &str) -> bool {
    s.contains("spotify.com/") || s.starts_with("spotify:")
}

pub fn is_track_url(s: &str) -> bool {
    s.contains("spotify.com/track/") || s.starts_with("spotify:track:")
}

pub fn is_playlist_url(s: &str) -> bool {
    s.contains("spotify.com/playlist/") || s.starts_with("spotify:playlist:")
}

pub fn is_album_url(s: &str) -> bool {
    s.contains("spotify.com/album/") || s.starts_with("spotify:album:")
}

/// Extract the entity id from a Spotify URL or URI.
///
/// The caller decides the entity kind with the `is_*` predicates; track,
/// playlist and album forms share this extractor. Query strings are not
/// part of the id. Returns `None` when no known shape matches.
pub fn extract_id(s: &str) -> Option<String> {
    if s.starts_with("spotify:") {
        return s
            .split(':')
            .nth(2)
            .filter(|id| !id.is_empty())
            .map(str::to_string);
    }

    ID_PATTERN
        .captures(s)
        .map(|caps| caps[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_track_urls_and_uris() {
        assert!(is_track_url("https://open.spotify.com/track/ABC123"));
        assert!(is_track_url("spotify:track:ABC123"));
        assert!(!is_track_url("https://open.spotify.com/playlist/ABC123"));
        assert!(!is_track_url("Daft Punk - Around The World"));
    }

    #[test]
    fn recognizes_playlist_and_album_forms() {
        assert!(is_playlist_url("https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M"));
        assert!(is_playlist_url("spotify:playlist:37i9dQZF1DXcBWIGoYBM5M"));
        assert!(is_album_url("https://open.spotify.com/album/XYZ9"));
        assert!(is_album_url("spotify:album:XYZ9"));
        assert!(!is_playlist_url("spotify:album:XYZ9"));
    }

    #[test]
    fn extracts_id_from_uri() {
        assert_eq!(extract_id("spotify:track:ABC123").as_deref(), Some("ABC123"));
        assert_eq!(extract_id("spotify:playlist:P1").as_deref(), Some("P1"));
        assert_eq!(extract_id("spotify:track:"), None);
    }

    #[test]
    fn extracts_id_from_url_stripping_query() {
        assert_eq!(
            extract_id("https://open.spotify.com/track/ABC123?si=xyz").as_deref(),
            Some("ABC123")
        );
        assert_eq!(
            extract_id("https://open.spotify.com/playlist/P1").as_deref(),
            Some("P1")
        );
    }

    #[test]
    fn unknown_shapes_extract_nothing() {
        assert_eq!(extract_id("not a spotify link"), None);
        assert_eq!(extract_id("https://example.com/track/ABC"), None);
    }

    #[test]
    fn video_urls_do_not_classify_as_catalog() {
        let url = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";
        assert!(!is_spotify_url(url));
        assert!(!is_track_url(url));
        assert!(!is_playlist_url(url));
        assert!(!is_album_url(url));
    }
}
