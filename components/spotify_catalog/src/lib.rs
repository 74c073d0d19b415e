// components/spotify_catalog/src/lib.rs
mod api;
mod error;
mod models;
pub mod urls;

use std::sync::Arc;

use music_primitives::{Bpm, Key};
use tokio_util::sync::CancellationToken;

use api::{AudioFeaturesObject, TrackObject};
pub use api::{HttpApi, SpotifyApi};
pub use error::CatalogError;
pub use models::{AudioFeatures, PlaylistInfo, TrackInfo};

/// The provider accepts at most this many ids per feature request
const FEATURE_BATCH_SIZE: usize = 100;

/// Client for the Spotify Web API.
///
/// Authenticates once at construction via the client-credentials flow
/// and holds the resulting bearer token for its lifetime.
pub struct SpotifyClient {
    api: Arc<dyn SpotifyApi>,
}

impl SpotifyClient {
    /// Create a client, performing the token exchange.
    pub async fn new(
        client_id: &str,
        client_secret: &str,
        cancel: &CancellationToken,
    ) -> Result<Self, CatalogError> {
        if client_id.is_empty() || client_secret.is_empty() {
            return Err(CatalogError::Configuration);
        }

        let api = HttpApi::authenticate(client_id, client_secret, cancel).await?;
        Ok(Self { api: Arc::new(api) })
    }

    /// Create a client over a specific API implementation
    pub fn new_with_api(api: Arc<dyn SpotifyApi>) -> Self {
        Self { api }
    }

    /// Fetch one track's metadata.
    ///
    /// Audio features are fetched best-effort afterwards; a feature
    /// lookup failure leaves `features` unset and is not an error.
    pub async fn get_track(
        &self,
        id: &str,
        cancel: &CancellationToken,
    ) -> Result<TrackInfo, CatalogError> {
        let track = self.api.track(id, cancel).await?;
        let mut info = track_info(track);

        match self.api.audio_features(id, cancel).await {
            Ok(raw) => info.features = audio_features(&raw),
            Err(CatalogError::Cancelled) => return Err(CatalogError::Cancelled),
            Err(e) => tracing::warn!("audio features unavailable for track {id}: {e}"),
        }

        Ok(info)
    }

    /// Fetch a playlist with its full track listing.
    ///
    /// Pagination failures stop the traversal but do not fail the call:
    /// a long playlist that partially loads should still yield
    /// downloadable songs rather than none.
    pub async fn get_playlist(
        &self,
        id: &str,
        cancel: &CancellationToken,
    ) -> Result<PlaylistInfo, CatalogError> {
        let playlist = self.api.playlist(id, cancel).await?;

        let mut tracks: Vec<TrackInfo> = playlist
            .tracks
            .items
            .into_iter()
            .filter_map(|item| item.track)
            .map(track_info)
            .collect();

        let mut next = playlist.tracks.next;
        while let Some(url) = next {
            match self.api.tracks_page(&url, cancel).await {
                Ok(page) => {
                    tracks.extend(page.items.into_iter().filter_map(|item| item.track).map(track_info));
                    next = page.next;
                }
                Err(CatalogError::Cancelled) => return Err(CatalogError::Cancelled),
                Err(e) => {
                    tracing::warn!(
                        "playlist {id} pagination stopped after {} tracks (partial result): {e}",
                        tracks.len()
                    );
                    break;
                }
            }
        }

        if !tracks.is_empty() {
            self.enrich_with_features(&mut tracks, cancel).await?;
        }

        Ok(PlaylistInfo {
            id: playlist.id,
            name: playlist.name,
            owner: playlist.owner.display_name.unwrap_or_default(),
            tracks,
        })
    }

    /// Attach audio features to tracks, batching by the provider limit.
    ///
    /// A failed batch leaves that batch's features unset and does not
    /// stop the remaining batches. Only cancellation is an error.
    async fn enrich_with_features(
        &self,
        tracks: &mut [TrackInfo],
        cancel: &CancellationToken,
    ) -> Result<(), CatalogError> {
        for chunk in tracks.chunks_mut(FEATURE_BATCH_SIZE) {
            let ids: Vec<String> = chunk.iter().map(|t| t.id.clone()).collect();

            match self.api.audio_features_batch(&ids, cancel).await {
                Ok(features) => {
                    for (track, raw) in chunk.iter_mut().zip(features) {
                        if let Some(raw) = raw {
                            track.features = audio_features(&raw);
                        }
                    }
                }
                Err(CatalogError::Cancelled) => return Err(CatalogError::Cancelled),
                Err(e) => {
                    tracing::warn!("audio feature batch of {} skipped: {e}", ids.len());
                }
            }
        }

        Ok(())
    }
}

fn track_info(track: TrackObject) -> TrackInfo {
    let artist = track
        .artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let search_query = format!("{} {}", artist, track.name);

    TrackInfo {
        id: track.id,
        name: track.name,
        artist,
        album: track.album.name,
        spotify_url: track.external_urls.spotify.unwrap_or_default(),
        search_query,
        features: AudioFeatures::default(),
    }
}

fn audio_features(raw: &AudioFeaturesObject) -> AudioFeatures {
    AudioFeatures {
        tempo: Bpm::from_f32(raw.tempo).ok(),
        key: Key::from_numeric(raw.key, raw.mode),
        energy: Some(raw.energy),
        danceability: Some(raw.danceability),
        valence: Some(raw.valence),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::{AlbumObject, ArtistObject, ExternalUrls, OwnerObject, PlaylistItem, PlaylistObject, TracksPage};
    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use std::sync::Mutex;

    fn track_obj(id: &str, name: &str, artists: &[&str]) -> TrackObject {
        TrackObject {
            id: id.to_string(),
            name: name.to_string(),
            artists: artists
                .iter()
                .map(|a| ArtistObject { name: a.to_string() })
                .collect(),
            album: AlbumObject {
                name: "Test Album".to_string(),
            },
            external_urls: ExternalUrls {
                spotify: Some(format!("https://open.spotify.com/track/{id}")),
            },
        }
    }

    fn features_obj(tempo: f32, key: i32, mode: i32) -> AudioFeaturesObject {
        AudioFeaturesObject {
            tempo,
            key,
            mode,
            energy: 0.8,
            danceability: 0.6,
            valence: 0.4,
        }
    }

    /// Stub api serving a playlist split into pages of the given sizes.
    /// Continuation n fails when listed in `failing_pages`; batch number
    /// n (0-based) fails when listed in `failing_batches`.
    struct StubApi {
        page_sizes: Vec<usize>,
        failing_pages: Vec<usize>,
        failing_batches: Vec<usize>,
        single_features_fail: bool,
        batch_sizes_seen: Mutex<Vec<usize>>,
        batches_served: Mutex<usize>,
    }

    impl StubApi {
        fn new(page_sizes: Vec<usize>) -> Self {
            Self {
                page_sizes,
                failing_pages: vec![],
                failing_batches: vec![],
                single_features_fail: false,
                batch_sizes_seen: Mutex::new(vec![]),
                batches_served: Mutex::new(0),
            }
        }

        fn page(&self, index: usize) -> TracksPage {
            let offset: usize = self.page_sizes[..index].iter().sum();
            let items = (0..self.page_sizes[index])
                .map(|i| PlaylistItem {
                    track: Some(track_obj(
                        &format!("t{}", offset + i),
                        &format!("Song {}", offset + i),
                        &["Artist"],
                    )),
                })
                .collect();
            let next = (index + 1 < self.page_sizes.len()).then(|| format!("page:{}", index + 1));
            TracksPage { items, next }
        }
    }

    #[async_trait]
    impl SpotifyApi for StubApi {
        async fn track(
            &self,
            id: &str,
            _cancel: &CancellationToken,
        ) -> Result<TrackObject, CatalogError> {
            if id == "missing" {
                return Err(CatalogError::NotFound(id.to_string()));
            }
            Ok(track_obj(id, "Around The World", &["Daft Punk", "Friend"]))
        }

        async fn playlist(
            &self,
            id: &str,
            _cancel: &CancellationToken,
        ) -> Result<PlaylistObject, CatalogError> {
            Ok(PlaylistObject {
                id: id.to_string(),
                name: "Test Playlist".to_string(),
                owner: OwnerObject {
                    display_name: Some("tester".to_string()),
                },
                tracks: self.page(0),
            })
        }

        async fn tracks_page(
            &self,
            next_url: &str,
            _cancel: &CancellationToken,
        ) -> Result<TracksPage, CatalogError> {
            let index: usize = next_url.trim_start_matches("page:").parse().unwrap();
            if self.failing_pages.contains(&index) {
                return Err(CatalogError::Network("boom".to_string()));
            }
            Ok(self.page(index))
        }

        async fn audio_features(
            &self,
            _id: &str,
            _cancel: &CancellationToken,
        ) -> Result<AudioFeaturesObject, CatalogError> {
            if self.single_features_fail {
                return Err(CatalogError::Network("boom".to_string()));
            }
            Ok(features_obj(123.4, 1, 0))
        }

        async fn audio_features_batch(
            &self,
            ids: &[String],
            _cancel: &CancellationToken,
        ) -> Result<Vec<Option<AudioFeaturesObject>>, CatalogError> {
            let batch = {
                let mut served = self.batches_served.lock().unwrap();
                let n = *served;
                *served += 1;
                n
            };
            self.batch_sizes_seen.lock().unwrap().push(ids.len());
            if self.failing_batches.contains(&batch) {
                return Err(CatalogError::Network("boom".to_string()));
            }
            Ok(ids.iter().map(|_| Some(features_obj(128.0, 0, 1))).collect())
        }
    }

    fn client(api: StubApi) -> SpotifyClient {
        SpotifyClient::new_with_api(Arc::new(api))
    }

    #[tokio::test]
    async fn empty_credentials_are_a_configuration_error() {
        let cancel = CancellationToken::new();
        let result = SpotifyClient::new("", "secret", &cancel).await;
        assert_matches!(result, Err(CatalogError::Configuration));

        let result = SpotifyClient::new("id", "", &cancel).await;
        assert_matches!(result, Err(CatalogError::Configuration));
    }

    #[tokio::test]
    async fn track_joins_artists_and_derives_search_query() {
        let client = client(StubApi::new(vec![]));
        let cancel = CancellationToken::new();

        let info = client.get_track("abc", &cancel).await.unwrap();
        assert_eq!(info.artist, "Daft Punk, Friend");
        assert_eq!(info.search_query, "Daft Punk, Friend Around The World");
        assert_eq!(info.features.tempo.unwrap().as_u32(), 123);
        assert_eq!(info.features.key.unwrap().to_compact(), "C#m");
    }

    #[tokio::test]
    async fn track_feature_failure_leaves_features_unset() {
        let mut api = StubApi::new(vec![]);
        api.single_features_fail = true;
        let client = client(api);
        let cancel = CancellationToken::new();

        let info = client.get_track("abc", &cancel).await.unwrap();
        assert!(info.features.is_empty());
    }

    #[tokio::test]
    async fn missing_track_is_not_found() {
        let client = client(StubApi::new(vec![]));
        let cancel = CancellationToken::new();

        let result = client.get_track("missing", &cancel).await;
        assert_matches!(result, Err(CatalogError::NotFound(_)));
    }

    #[tokio::test]
    async fn playlist_traverses_all_pages_in_order() {
        let client = client(StubApi::new(vec![100, 100, 37]));
        let cancel = CancellationToken::new();

        let playlist = client.get_playlist("P1", &cancel).await.unwrap();
        assert_eq!(playlist.tracks.len(), 237);
        assert_eq!(playlist.tracks[0].id, "t0");
        assert_eq!(playlist.tracks[100].id, "t100");
        assert_eq!(playlist.tracks[236].id, "t236");
        assert_eq!(playlist.name, "Test Playlist");
        assert_eq!(playlist.owner, "tester");
    }

    #[tokio::test]
    async fn failed_continuation_returns_partial_playlist() {
        let mut api = StubApi::new(vec![100, 100, 37]);
        api.failing_pages = vec![1];
        let client = client(api);
        let cancel = CancellationToken::new();

        let playlist = client.get_playlist("P1", &cancel).await.unwrap();
        assert_eq!(playlist.tracks.len(), 100);
    }

    #[tokio::test]
    async fn failed_batch_skips_enrichment_for_that_batch_only() {
        let mut api = StubApi::new(vec![100, 100, 37]);
        api.failing_batches = vec![1];
        let client = client(api);
        let cancel = CancellationToken::new();

        let playlist = client.get_playlist("P1", &cancel).await.unwrap();
        assert_eq!(playlist.tracks.len(), 237);
        assert!(!playlist.tracks[0].features.is_empty());
        assert!(playlist.tracks[100].features.is_empty());
        assert!(playlist.tracks[199].features.is_empty());
        assert!(!playlist.tracks[200].features.is_empty());
    }

    #[tokio::test]
    async fn batch_sizes_respect_provider_limit() {
        let api = Arc::new(StubApi::new(vec![100, 100, 37]));
        let client = SpotifyClient::new_with_api(api.clone());
        let cancel = CancellationToken::new();

        let playlist = client.get_playlist("P1", &cancel).await.unwrap();
        assert!(playlist.tracks.iter().all(|t| !t.features.is_empty()));
        assert_eq!(*api.batch_sizes_seen.lock().unwrap(), vec![100, 100, 37]);
    }

    #[test]
    fn undetected_key_and_zero_tempo_map_to_none() {
        let mapped = audio_features(&features_obj(0.0, -1, 0));
        assert!(mapped.tempo.is_none());
        assert!(mapped.key.is_none());
        assert_eq!(mapped.energy, Some(0.8));
    }
}
