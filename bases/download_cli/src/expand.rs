// bases/download_cli/src/expand.rs
use spotify_catalog::{urls, SpotifyClient};
use tokio_util::sync::CancellationToken;

use crate::output::{truncate, OutputHandler};

/// Expand one raw input into zero or more acquisition targets.
///
/// Playlist references become one search query per track, in playlist
/// order. Everything else passes through unchanged; track URLs in
/// particular are resolved later, right before acquisition, so a
/// failed lookup degrades to searching for the raw text instead of
/// dropping the item.
///
/// A playlist that cannot be expanded (no credentials, bad id, failed
/// lookup) is dropped with a warning, never fatal to the run.
pub async fn expand_input(
    input: &str,
    catalog: Option<&SpotifyClient>,
    output: &OutputHandler,
    cancel: &CancellationToken,
) -> Vec<String> {
    let input = input.trim();
    if input.is_empty() {
        return Vec::new();
    }

    if !urls::is_playlist_url(input) {
        return vec![input.to_string()];
    }

    let Some(catalog) = catalog else {
        output.warn(&format!(
            "Spotify credentials required for playlist: {}",
            truncate(input, 50)
        ));
        return Vec::new();
    };

    let Some(playlist_id) = urls::extract_id(input) else {
        output.warn(&format!(
            "Could not extract playlist ID from: {}",
            truncate(input, 50)
        ));
        return Vec::new();
    };

    output.print_fetching_playlist();
    let playlist = match catalog.get_playlist(&playlist_id, cancel).await {
        Ok(playlist) => playlist,
        Err(e) => {
            output.warn(&format!("Failed to fetch playlist: {e}"));
            return Vec::new();
        }
    };

    output.print_playlist(&playlist.name, playlist.tracks.len());
    playlist
        .tracks
        .into_iter()
        .map(|track| track.search_query)
        .collect()
}
