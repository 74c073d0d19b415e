// components/media_downloader/src/ytdlp.rs
use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio_util::sync::CancellationToken;

use crate::progress::{
    parse_percent, parse_title_value, rescale_percent, select_artifact_line, stderr_tail,
};
use crate::types::{DownloadError, ProgressSink, VideoInfo};
use crate::utils::split_artist_title;

/// Alternative player clients avoid 403s from the default web client
const EXTRACTOR_ARGS: &str = "youtube:player_client=android,web";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Capability surface of the external acquisition tool.
#[async_trait]
pub trait MediaTool: Send + Sync {
    /// Check the tool is installed and reachable
    async fn check_available(&self) -> Result<(), DownloadError>;

    /// Find the single best match for a query, returning (title, video id)
    async fn search(
        &self,
        query: &str,
        cancel: &CancellationToken,
    ) -> Result<(String, String), DownloadError>;

    /// Download `url` as audio into `dir`, streaming progress updates.
    ///
    /// Returns the artifact path the tool printed, or `None` when it
    /// exited cleanly without printing one; the engine then falls back
    /// to scanning the directory.
    async fn fetch(
        &self,
        url: &str,
        dir: &Path,
        progress: &ProgressSink,
        cancel: &CancellationToken,
    ) -> Result<Option<PathBuf>, DownloadError>;

    /// Metadata-only lookup for a video URL
    async fn probe(&self, url: &str, cancel: &CancellationToken)
        -> Result<VideoInfo, DownloadError>;
}

pub struct YtDlp;

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    title: String,
    duration: Option<f64>,
    webpage_url: Option<String>,
}

impl YtDlp {
    /// One search-mode invocation: `ytsearch1:` plus a value flag,
    /// expecting a title line and a value line on stdout.
    async fn search_once(
        &self,
        query: &str,
        value_flag: &str,
        cancel: &CancellationToken,
    ) -> Result<(String, String), DownloadError> {
        let run = Command::new("yt-dlp")
            .arg(format!("ytsearch1:{query}"))
            .arg(value_flag)
            .arg("--get-title")
            .arg("--no-warnings")
            .arg("--no-playlist")
            .kill_on_drop(true)
            .output();

        let output = tokio::select! {
            result = run => result?,
            _ = cancel.cancelled() => return Err(DownloadError::Cancelled),
        };

        if !output.status.success() {
            let stderr_lines: Vec<String> = String::from_utf8_lossy(&output.stderr)
                .lines()
                .map(str::to_string)
                .collect();
            return Err(DownloadError::ToolFailed {
                status: output.status.code().unwrap_or(-1),
                stderr_tail: stderr_tail(&stderr_lines),
            });
        }

        parse_title_value(&String::from_utf8_lossy(&output.stdout))
            .ok_or_else(|| DownloadError::NoResults(query.to_string()))
    }
}

#[async_trait]
impl MediaTool for YtDlp {
    async fn check_available(&self) -> Result<(), DownloadError> {
        which::which("yt-dlp")
            .map(|_| ())
            .map_err(|_| DownloadError::ToolNotFound)
    }

    async fn search(
        &self,
        query: &str,
        cancel: &CancellationToken,
    ) -> Result<(String, String), DownloadError> {
        // --get-url yields a transient direct-media URL, not a stable
        // watch URL, so a second invocation fetches the video id and
        // the caller rebuilds the watch URL from that.
        self.search_once(query, "--get-url", cancel).await?;
        let (title, video_id) = self.search_once(query, "--get-id", cancel).await?;

        Ok((title, video_id))
    }

    async fn fetch(
        &self,
        url: &str,
        dir: &Path,
        progress: &ProgressSink,
        cancel: &CancellationToken,
    ) -> Result<Option<PathBuf>, DownloadError> {
        let template = dir.join("%(title)s.%(ext)s");

        let mut child = Command::new("yt-dlp")
            .arg("-f")
            .arg("bestaudio[ext=m4a]/bestaudio/best")
            .arg("-x")
            .arg("--audio-format")
            .arg("mp3")
            .arg("--audio-quality")
            .arg("192K")
            .arg("--embed-thumbnail")
            .arg("--add-metadata")
            .arg("--no-playlist")
            .arg("--no-warnings")
            .arg("--progress")
            .arg("--newline")
            .arg("-o")
            .arg(&template)
            .arg("--print")
            .arg("after_move:filepath")
            .arg("--extractor-args")
            .arg(EXTRACTOR_ARGS)
            .arg("--user-agent")
            .arg(USER_AGENT)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        let stdout = child.stdout.take().ok_or_else(|| {
            DownloadError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "stdout not captured",
            ))
        })?;
        let stderr = child.stderr.take().ok_or_else(|| {
            DownloadError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "stderr not captured",
            ))
        })?;

        // Both pipes are drained concurrently so a chatty stream cannot
        // block the subprocess on a full buffer. Each reader owns its
        // accumulator; they are joined before the status is inspected.
        let progress_reader = tokio::spawn({
            let progress = progress.clone();
            async move {
                let mut lines = BufReader::new(stderr).lines();
                let mut seen = Vec::new();
                while let Ok(Some(line)) = lines.next_line().await {
                    if let Some(raw) = parse_percent(&line) {
                        progress.report(rescale_percent(raw), "Downloading...");
                    }
                    seen.push(line);
                }
                seen
            }
        });

        let path_reader = tokio::spawn(async move {
            let mut lines = BufReader::new(stdout).lines();
            let mut seen = Vec::new();
            while let Ok(Some(line)) = lines.next_line().await {
                seen.push(line);
            }
            seen
        });

        let status = tokio::select! {
            status = child.wait() => status?,
            _ = cancel.cancelled() => {
                let _ = child.start_kill();
                let _ = child.wait().await;
                return Err(DownloadError::Cancelled);
            }
        };

        let stderr_lines = progress_reader.await.unwrap_or_default();
        let stdout_lines = path_reader.await.unwrap_or_default();

        if !status.success() {
            return Err(DownloadError::ToolFailed {
                status: status.code().unwrap_or(-1),
                stderr_tail: stderr_tail(&stderr_lines),
            });
        }

        tracing::debug!("yt-dlp exited cleanly with {} stdout lines", stdout_lines.len());
        Ok(select_artifact_line(&stdout_lines).map(PathBuf::from))
    }

    async fn probe(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<VideoInfo, DownloadError> {
        let run = Command::new("yt-dlp")
            .arg("--dump-json")
            .arg("--no-download")
            .arg("--no-warnings")
            .arg("--no-playlist")
            .arg(url)
            .kill_on_drop(true)
            .output();

        let output = tokio::select! {
            result = run => result?,
            _ = cancel.cancelled() => return Err(DownloadError::Cancelled),
        };

        if !output.status.success() {
            let stderr_lines: Vec<String> = String::from_utf8_lossy(&output.stderr)
                .lines()
                .map(str::to_string)
                .collect();
            return Err(DownloadError::ToolFailed {
                status: output.status.code().unwrap_or(-1),
                stderr_tail: stderr_tail(&stderr_lines),
            });
        }

        let raw: ProbeOutput = serde_json::from_slice(&output.stdout)
            .map_err(|e| DownloadError::MalformedOutput(e.to_string()))?;

        let (artist, title) = split_artist_title(&raw.title);

        Ok(VideoInfo {
            title,
            artist,
            duration_secs: raw.duration.map(|secs| secs.round() as u32),
            source_url: raw.webpage_url.unwrap_or_else(|| url.to_string()),
        })
    }
}
