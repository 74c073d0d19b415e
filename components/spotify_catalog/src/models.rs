// components/spotify_catalog/src/models.rs
use music_primitives::{Bpm, Key};

/// Audio features for one track.
///
/// Every field is optional: a failed or empty feature lookup leaves the
/// whole struct at its default, and downstream rendering omits absent
/// values. `None` is distinct from a real zero reported by the catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AudioFeatures {
    pub tempo: Option<Bpm>,
    pub key: Option<Key>,
    pub energy: Option<f32>,
    pub danceability: Option<f32>,
    pub valence: Option<f32>,
}

impl AudioFeatures {
    pub fn is_empty(&self) -> bool {
        self.tempo.is_none()
            && self.key.is_none()
            && self.energy.is_none()
            && self.danceability.is_none()
            && self.valence.is_none()
    }
}

/// Metadata for one Spotify track.
#[derive(Debug, Clone)]
pub struct TrackInfo {
    pub id: String,
    pub name: String,
    /// All artist names joined with ", "
    pub artist: String,
    pub album: String,
    pub spotify_url: String,
    /// "<artists> <track name>", used to locate the track on YouTube
    pub search_query: String,
    pub features: AudioFeatures,
}

/// Metadata for one Spotify playlist.
///
/// `tracks` holds the full pagination traversal in page order. If a
/// continuation fetch fails, the playlist is still returned with the
/// tracks accumulated so far.
#[derive(Debug, Clone)]
pub struct PlaylistInfo {
    pub id: String,
    pub name: String,
    pub owner: String,
    pub tracks: Vec<TrackInfo>,
}
