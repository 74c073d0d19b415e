// components/media_downloader/src/lib.rs
mod progress;
mod types;
pub mod urls;
mod utils;
mod ytdlp;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use url::Url;

use progress::AUDIO_SUFFIX;
pub use types::{DownloadError, DownloadResult, ProgressSink, VideoInfo};
use utils::{split_artist_title, title_from_path};
pub use ytdlp::{MediaTool, YtDlp};

/// Acquisition engine: resolves a query or video URL to an audio file
/// in the download directory by driving the external tool.
///
/// Progress is reported on a 0-100% scale across both phases: search
/// start at 0%, match found at 10%, fetch start at 15%, the tool's own
/// progress rescaled into 15-90%, completion at 100%.
pub struct MediaDownloader {
    download_dir: PathBuf,
    tool: Arc<dyn MediaTool>,
}

impl MediaDownloader {
    /// Create an engine that stores files in the given directory
    pub async fn new(download_dir: impl AsRef<Path>) -> Result<Self, DownloadError> {
        Self::new_with_tool(download_dir, Arc::new(YtDlp)).await
    }

    /// Create an engine over a specific tool implementation
    pub async fn new_with_tool(
        download_dir: impl AsRef<Path>,
        tool: Arc<dyn MediaTool>,
    ) -> Result<Self, DownloadError> {
        tool.check_available().await?;

        let download_dir = download_dir.as_ref().to_owned();
        tokio::fs::create_dir_all(&download_dir).await?;

        Ok(Self { download_dir, tool })
    }

    /// Search for the best match for a query, then download it
    pub async fn search_and_download(
        &self,
        query: &str,
        progress: &ProgressSink,
        cancel: &CancellationToken,
    ) -> Result<DownloadResult, DownloadError> {
        progress.report(0.0, "Searching...");

        let (title, video_id) = self.tool.search(query, cancel).await?;
        progress.report(10.0, &format!("Found: {title}"));

        self.download(&urls::watch_url(&video_id), progress, cancel)
            .await
    }

    /// Download audio from a video URL
    pub async fn download(
        &self,
        url: &str,
        progress: &ProgressSink,
        cancel: &CancellationToken,
    ) -> Result<DownloadResult, DownloadError> {
        Url::parse(url).map_err(|e| DownloadError::InvalidUrl(e.to_string()))?;

        progress.report(15.0, "Starting download...");

        let reported = self
            .tool
            .fetch(url, &self.download_dir, progress, cancel)
            .await?;

        let file_path = match reported {
            Some(path) => path,
            None => self.find_latest_artifact().await?,
        };

        progress.report(100.0, "Download complete!");

        let title = title_from_path(&file_path);
        let (artist, _) = split_artist_title(&title);

        Ok(DownloadResult {
            file_path,
            title,
            artist,
            source_url: url.to_string(),
        })
    }

    /// Metadata for a video URL, without downloading
    pub async fn video_info(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<VideoInfo, DownloadError> {
        Url::parse(url).map_err(|e| DownloadError::InvalidUrl(e.to_string()))?;
        self.tool.probe(url, cancel).await
    }

    /// Fallback for tools that download successfully but never print
    /// the artifact path: take the most recently enumerated audio file
    /// in the download directory.
    async fn find_latest_artifact(&self) -> Result<PathBuf, DownloadError> {
        tracing::debug!(
            "no artifact path reported, scanning {}",
            self.download_dir.display()
        );

        let mut entries = tokio::fs::read_dir(&self.download_dir).await?;
        let mut found = None;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.to_string_lossy().ends_with(AUDIO_SUFFIX) && entry.file_type().await?.is_file()
            {
                found = Some(path);
            }
        }

        found.ok_or(DownloadError::OutputNotFound)
    }
}
