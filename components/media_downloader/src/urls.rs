// components/media_downloader/src/urls.rs
//! Classification of video-platform links.
//!
//! Substring matching rather than full URL parsing, so surrounding
//! whitespace or extra tracking parameters do not defeat recognition.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref VIDEO_ID_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"youtube\.com/watch\?v=([A-Za-z0-9_-]{11})").unwrap(),
        Regex::new(r"youtu\.be/([A-Za-z0-9_-]{11})").unwrap(),
        Regex::new(r"youtube\.com/shorts/([A-Za-z0-9_-]{11})").unwrap(),
        Regex::new(r"music\.youtube\.com/watch\?v=([A-Za-z0-9_-]{11})").unwrap(),
    ];
}

/// True when the string carries one of the supported YouTube URL shapes
pub fn is_youtube_url(s: &str) -> bool {
    s.contains("youtube.com/watch?v=")
        || s.contains("youtu.be/")
        || s.contains("youtube.com/shorts/")
        || s.contains("music.youtube.com/watch?v=")
}

/// Extract the 11-character video id from a supported URL shape.
///
/// The length and character class act as a correctness filter: a link
/// whose id slot holds anything else extracts nothing.
pub fn extract_video_id(s: &str) -> Option<String> {
    VIDEO_ID_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(s).map(|caps| caps[1].to_string()))
}

/// Canonical watch URL for a video id
pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={video_id}")
}
