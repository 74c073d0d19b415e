// components/media_downloader/src/types.rs
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("yt-dlp not found in PATH")]
    ToolNotFound,

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("no results found for: {0}")]
    NoResults(String),

    #[error("yt-dlp failed (status {status}): {stderr_tail}")]
    ToolFailed { status: i32, stderr_tail: String },

    #[error("unexpected tool output: {0}")]
    MalformedOutput(String),

    #[error("download completed but file not found")]
    OutputNotFound,

    #[error("cancelled")]
    Cancelled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The result of one successful acquisition.
///
/// `file_path` points at an existing audio file in the download
/// directory; ownership passes to the caller.
#[derive(Debug, Clone)]
pub struct DownloadResult {
    pub file_path: PathBuf,
    /// Artifact file name without the audio suffix
    pub title: String,
    /// Artist half of an "Artist - Title" shaped title, when present
    pub artist: Option<String>,
    pub source_url: String,
}

/// Metadata for a video, without downloading it
#[derive(Debug, Clone)]
pub struct VideoInfo {
    pub title: String,
    pub artist: Option<String>,
    pub duration_secs: Option<u32>,
    pub source_url: String,
}

/// Shared handle for streaming (percent 0-100, status text) updates.
///
/// Cloned into the stream-reader task during a fetch, so the callback
/// must be `Send + Sync`.
#[derive(Clone)]
pub struct ProgressSink(Arc<dyn Fn(f32, &str) + Send + Sync>);

impl ProgressSink {
    pub fn new(callback: impl Fn(f32, &str) + Send + Sync + 'static) -> Self {
        Self(Arc::new(callback))
    }

    /// Sink that discards all updates
    pub fn noop() -> Self {
        Self::new(|_, _| {})
    }

    pub fn report(&self, percent: f32, status: &str) {
        (self.0.as_ref())(percent, status);
    }
}
