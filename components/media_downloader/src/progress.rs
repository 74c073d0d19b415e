// components/media_downloader/src/progress.rs
//! Parsing of the acquisition tool's semi-structured output.
//!
//! yt-dlp reports progress as free text on stderr and, when asked,
//! prints the finished artifact path on stdout. Both channels are
//! unreliable enough that everything here is tolerant: percentages are
//! pattern-matched anywhere in a line, and duplicate path prints are
//! resolved in favor of the last one.

use lazy_static::lazy_static;
use regex::Regex;

/// Suffix of finished artifacts
pub const AUDIO_SUFFIX: &str = ".mp3";

/// The fetch phase occupies 15-90% of the overall progress signal
const FETCH_SPAN_START: f32 = 15.0;
const FETCH_SPAN_SCALE: f32 = 0.75;

/// How many trailing progress lines to keep for failure diagnostics
const STDERR_TAIL_LINES: usize = 3;

lazy_static! {
    static ref PERCENT_PATTERN: Regex = Regex::new(r"(\d+\.?\d*)%").unwrap();
}

/// Extract a progress percentage from one line of progress output
pub fn parse_percent(line: &str) -> Option<f32> {
    PERCENT_PATTERN
        .captures(line)
        .and_then(|caps| caps[1].parse().ok())
}

/// Rescale the tool's own 0-100 domain into the fetch sub-range
pub fn rescale_percent(raw: f32) -> f32 {
    FETCH_SPAN_START + raw * FETCH_SPAN_SCALE
}

/// Pick the artifact path from captured stdout lines.
///
/// The last line ending in the audio suffix wins, tolerating tools
/// that print the final path more than once.
pub fn select_artifact_line(lines: &[String]) -> Option<&str> {
    lines
        .iter()
        .rev()
        .map(|line| line.trim())
        .find(|line| !line.is_empty() && line.ends_with(AUDIO_SUFFIX))
}

/// Last few progress lines, joined for an error message
pub fn stderr_tail(lines: &[String]) -> String {
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[start..].join("; ")
}

/// Parse search-mode output: a title line followed by a value line
pub fn parse_title_value(stdout: &str) -> Option<(String, String)> {
    let mut lines = stdout.trim().lines().map(str::trim);
    let title = lines.next()?.to_string();
    let value = lines.next()?.to_string();
    if title.is_empty() || value.is_empty() {
        return None;
    }
    Some((title, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_is_found_anywhere_in_the_line() {
        assert_eq!(
            parse_percent("[download]  45.2% of 3.52MiB at 1.21MiB/s"),
            Some(45.2)
        );
        assert_eq!(parse_percent("[download] 100% of 3.52MiB"), Some(100.0));
        assert_eq!(parse_percent("[ExtractAudio] Destination: x.mp3"), None);
    }

    #[test]
    fn rescaling_maps_the_span_endpoints() {
        assert_eq!(rescale_percent(0.0), 15.0);
        assert_eq!(rescale_percent(100.0), 90.0);
        assert_eq!(rescale_percent(50.0), 52.5);
    }

    #[test]
    fn last_duplicate_path_line_wins() {
        let lines = vec![
            "/music/Song A.mp3".to_string(),
            "/music/Song B.mp3".to_string(),
        ];
        assert_eq!(select_artifact_line(&lines), Some("/music/Song B.mp3"));
    }

    #[test]
    fn non_audio_lines_are_ignored() {
        let lines = vec![
            "warning: something".to_string(),
            "  /music/Song.mp3  ".to_string(),
            "".to_string(),
        ];
        assert_eq!(select_artifact_line(&lines), Some("/music/Song.mp3"));

        let lines = vec!["no paths here".to_string()];
        assert_eq!(select_artifact_line(&lines), None);
    }

    #[test]
    fn tail_keeps_the_last_three_lines() {
        let lines: Vec<String> = (1..=5).map(|i| format!("line {i}")).collect();
        assert_eq!(stderr_tail(&lines), "line 3; line 4; line 5");

        let lines = vec!["only".to_string()];
        assert_eq!(stderr_tail(&lines), "only");
    }

    #[test]
    fn title_value_needs_two_lines() {
        assert_eq!(
            parse_title_value("Song Title\ndQw4w9WgXcQ\n"),
            Some(("Song Title".to_string(), "dQw4w9WgXcQ".to_string()))
        );
        assert_eq!(parse_title_value("Song Title\n"), None);
        assert_eq!(parse_title_value(""), None);
    }
}
