// components/spotify_catalog/src/error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("spotify credentials not configured")]
    Configuration,

    #[error("spotify authentication failed: {0}")]
    Authentication(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("spotify request failed: {0}")]
    Network(String),

    #[error("cancelled")]
    Cancelled,
}

impl From<reqwest::Error> for CatalogError {
    fn from(e: reqwest::Error) -> Self {
        CatalogError::Network(e.to_string())
    }
}
