// components/spotify_catalog/src/api.rs
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

use crate::error::CatalogError;

const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const API_BASE: &str = "https://api.spotify.com/v1";

// Wire types, mirroring only the response fields we read.

#[derive(Debug, Deserialize)]
pub struct TrackObject {
    pub id: String,
    pub name: String,
    pub artists: Vec<ArtistObject>,
    pub album: AlbumObject,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Deserialize)]
pub struct ArtistObject {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct AlbumObject {
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AudioFeaturesObject {
    pub tempo: f32,
    /// Pitch class 0-11, or -1 when the catalog could not detect a key
    pub key: i32,
    pub mode: i32,
    pub energy: f32,
    pub danceability: f32,
    pub valence: f32,
}

#[derive(Debug, Deserialize)]
struct AudioFeaturesBatch {
    audio_features: Vec<Option<AudioFeaturesObject>>,
}

#[derive(Debug, Deserialize)]
pub struct PlaylistObject {
    pub id: String,
    pub name: String,
    pub owner: OwnerObject,
    pub tracks: TracksPage,
}

#[derive(Debug, Deserialize)]
pub struct OwnerObject {
    pub display_name: Option<String>,
}

/// One page of playlist tracks; `next` is the absolute URL of the
/// following page, absent on the last one.
#[derive(Debug, Deserialize)]
pub struct TracksPage {
    pub items: Vec<PlaylistItem>,
    pub next: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<TrackObject>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Raw catalog API surface, one method per endpoint we call.
///
/// The production implementation talks HTTP; tests swap in a stub so
/// pagination and enrichment logic run without a network.
#[async_trait]
pub trait SpotifyApi: Send + Sync {
    async fn track(&self, id: &str, cancel: &CancellationToken)
        -> Result<TrackObject, CatalogError>;

    async fn playlist(
        &self,
        id: &str,
        cancel: &CancellationToken,
    ) -> Result<PlaylistObject, CatalogError>;

    /// Fetch a pagination continuation by its absolute URL.
    async fn tracks_page(
        &self,
        next_url: &str,
        cancel: &CancellationToken,
    ) -> Result<TracksPage, CatalogError>;

    async fn audio_features(
        &self,
        id: &str,
        cancel: &CancellationToken,
    ) -> Result<AudioFeaturesObject, CatalogError>;

    /// Batch feature lookup; the provider accepts at most 100 ids and
    /// returns null entries for unknown ids.
    async fn audio_features_batch(
        &self,
        ids: &[String],
        cancel: &CancellationToken,
    ) -> Result<Vec<Option<AudioFeaturesObject>>, CatalogError>;
}

/// HTTP-backed `SpotifyApi` holding the bearer token acquired at
/// construction.
pub struct HttpApi {
    client: reqwest::Client,
    token: String,
}

impl HttpApi {
    /// Perform the client-credentials exchange and return a ready client.
    pub async fn authenticate(
        client_id: &str,
        client_secret: &str,
        cancel: &CancellationToken,
    ) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        let send = client
            .post(TOKEN_URL)
            .basic_auth(client_id, Some(client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send();

        let response = tokio::select! {
            r = send => r.map_err(|e| CatalogError::Authentication(e.to_string()))?,
            _ = cancel.cancelled() => return Err(CatalogError::Cancelled),
        };

        if !response.status().is_success() {
            return Err(CatalogError::Authentication(format!(
                "token endpoint returned {}",
                response.status()
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| CatalogError::Authentication(e.to_string()))?;

        Ok(Self {
            client,
            token: token.access_token,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<T, CatalogError> {
        let send = self.client.get(url).bearer_auth(&self.token).send();

        let response = tokio::select! {
            r = send => r?,
            _ = cancel.cancelled() => return Err(CatalogError::Cancelled),
        };

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(url.to_string()));
        }
        if !response.status().is_success() {
            return Err(CatalogError::Network(format!(
                "{} returned {}",
                url,
                response.status()
            )));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl SpotifyApi for HttpApi {
    async fn track(
        &self,
        id: &str,
        cancel: &CancellationToken,
    ) -> Result<TrackObject, CatalogError> {
        self.get_json(&format!("{API_BASE}/tracks/{id}"), cancel).await
    }

    async fn playlist(
        &self,
        id: &str,
        cancel: &CancellationToken,
    ) -> Result<PlaylistObject, CatalogError> {
        self.get_json(&format!("{API_BASE}/playlists/{id}"), cancel)
            .await
    }

    async fn tracks_page(
        &self,
        next_url: &str,
        cancel: &CancellationToken,
    ) -> Result<TracksPage, CatalogError> {
        self.get_json(next_url, cancel).await
    }

    async fn audio_features(
        &self,
        id: &str,
        cancel: &CancellationToken,
    ) -> Result<AudioFeaturesObject, CatalogError> {
        self.get_json(&format!("{API_BASE}/audio-features/{id}"), cancel)
            .await
    }

    async fn audio_features_batch(
        &self,
        ids: &[String],
        cancel: &CancellationToken,
    ) -> Result<Vec<Option<AudioFeaturesObject>>, CatalogError> {
        let url = format!("{API_BASE}/audio-features?ids={}", ids.join(","));
        let batch: AudioFeaturesBatch = self.get_json(&url, cancel).await?;
        Ok(batch.audio_features)
    }
}
