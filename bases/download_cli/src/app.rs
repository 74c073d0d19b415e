// bases/download_cli/src/app.rs
use color_eyre::eyre::eyre;
use color_eyre::Result;
use media_downloader::{urls as video_urls, DownloadError, MediaDownloader};
use spotify_catalog::{urls as catalog_urls, SpotifyClient};
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::expand::expand_input;
use crate::output::OutputHandler;

/// Outcome counters for one run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub cancelled: bool,
}

impl RunSummary {
    /// Exit-status policy: any failure, or a cancelled run, is failure
    pub fn is_success(&self) -> bool {
        self.failed == 0 && !self.cancelled
    }
}

pub struct App {
    config: Config,
    output: OutputHandler,
}

impl App {
    pub fn new(config: Config) -> Self {
        let output = OutputHandler::new(config.verbose);
        Self { config, output }
    }

    pub async fn run(&self, cancel: &CancellationToken) -> Result<RunSummary> {
        // Catalog features are optional: failed init means playlists
        // warn and track URLs fall back, not that the run aborts.
        let catalog = match &self.config.credentials {
            Some(creds) => {
                match SpotifyClient::new(&creds.client_id, &creds.client_secret, cancel).await {
                    Ok(client) => Some(client),
                    Err(e) => {
                        self.output.warn(&format!("Spotify init failed: {e}"));
                        None
                    }
                }
            }
            None => None,
        };

        let raw_inputs = self.collect_inputs().await?;

        let mut queue = Vec::new();
        for raw in &raw_inputs {
            queue.extend(expand_input(raw, catalog.as_ref(), &self.output, cancel).await);
        }

        if queue.is_empty() {
            return Err(eyre!("no songs specified (use --help for usage)"));
        }

        let downloader = MediaDownloader::new(&self.config.output_dir).await?;
        self.output.print_header(&self.config.output_dir, queue.len());

        let summary = self
            .run_queue(&downloader, catalog.as_ref(), &queue, cancel)
            .await;
        self.output.print_summary(&summary);

        Ok(summary)
    }

    pub fn print_error(&self, error: &color_eyre::Report) {
        self.output.print_error(error);
    }

    async fn collect_inputs(&self) -> Result<Vec<String>> {
        let mut inputs = self.config.songs.clone();

        if let Some(path) = &self.config.input_file {
            let contents = tokio::fs::read_to_string(path).await?;
            inputs.extend(read_song_lines(&contents));
        }

        Ok(inputs)
    }

    /// Process the queue strictly in order, one item at a time.
    ///
    /// A failed item is counted and the run continues; only explicit
    /// cancellation stops the remaining queue.
    async fn run_queue(
        &self,
        downloader: &MediaDownloader,
        catalog: Option<&SpotifyClient>,
        queue: &[String],
        cancel: &CancellationToken,
    ) -> RunSummary {
        let mut summary = RunSummary::default();

        for (index, item) in queue.iter().enumerate() {
            if cancel.is_cancelled() {
                self.output.warn("Cancelled");
                summary.cancelled = true;
                break;
            }

            self.output.print_item(index + 1, queue.len(), item);

            let target = self.resolve_target(item, catalog, cancel).await;

            let (bar, sink) = self.output.download_progress();
            let result = if video_urls::is_youtube_url(&target) {
                downloader.download(&target, &sink, cancel).await
            } else {
                downloader.search_and_download(&target, &sink, cancel).await
            };
            bar.finish_and_clear();

            match result {
                Ok(result) => {
                    summary.succeeded += 1;
                    self.output.print_success(&result);
                }
                Err(DownloadError::Cancelled) => {
                    summary.cancelled = true;
                    break;
                }
                Err(e) => {
                    summary.failed += 1;
                    self.output.print_failure(&e);
                }
            }
        }

        summary
    }

    /// Resolve a catalog track URL to its derived search query, echoing
    /// the track metadata. Any lookup problem silently falls back to
    /// the raw item text so the item is never dropped here.
    async fn resolve_target(
        &self,
        item: &str,
        catalog: Option<&SpotifyClient>,
        cancel: &CancellationToken,
    ) -> String {
        if !catalog_urls::is_track_url(item) {
            return item.to_string();
        }
        let Some(catalog) = catalog else {
            return item.to_string();
        };
        let Some(track_id) = catalog_urls::extract_id(item) else {
            return item.to_string();
        };

        match catalog.get_track(&track_id, cancel).await {
            Ok(track) => {
                self.output.print_resolved_track(&track);
                track.search_query
            }
            Err(e) => {
                tracing::debug!("track lookup failed for {item}, using raw input: {e}");
                item.to_string()
            }
        }
    }
}

/// Song lines from an input file: blanks and `#` comments skipped
fn read_song_lines(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
