// components/media_downloader/src/utils.rs
use std::path::Path;

/// Display title of a finished artifact: the file name without suffix
pub fn title_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Split an "Artist - Title" shaped name into its halves.
///
/// Returns `(None, name)` when the shape does not apply, so callers
/// can always use the second half as a display title.
pub fn split_artist_title(name: &str) -> (Option<String>, String) {
    match name.split_once(" - ") {
        Some((artist, title)) if !artist.trim().is_empty() && !title.trim().is_empty() => (
            Some(artist.trim().to_string()),
            title.trim().to_string(),
        ),
        _ => (None, name.trim().to_string()),
    }
}
