// bases/download_cli/src/output.rs
use std::path::Path;
use std::sync::{Arc, Mutex};

use indicatif::{ProgressBar, ProgressStyle};
use media_downloader::{DownloadResult, ProgressSink};
use spotify_catalog::TrackInfo;

use crate::app::RunSummary;

pub struct OutputHandler {
    verbose: bool,
}

impl OutputHandler {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn print_header(&self, output_dir: &Path, count: usize) {
        println!("\n📁 {}", output_dir.display());
        println!("🎵 {} song(s)\n", count);
    }

    pub fn print_item(&self, index: usize, total: usize, input: &str) {
        println!("[{}/{}] {}", index, total, truncate(input, 55));
    }

    /// Echo a resolved catalog track, with tempo and key when known
    pub fn print_resolved_track(&self, track: &TrackInfo) {
        let mut line = format!("  → {} - {}", track.artist, track.name);
        if let Some(tempo) = track.features.tempo {
            line.push_str(&format!(" [{} BPM", tempo.as_u32()));
            if let Some(key) = track.features.key {
                line.push_str(&format!(", {}", key.to_compact()));
            }
            line.push(']');
        } else if let Some(key) = track.features.key {
            line.push_str(&format!(" [{}]", key.to_compact()));
        }
        println!("{line}");
    }

    pub fn print_fetching_playlist(&self) {
        println!("📋 Fetching Spotify playlist...");
    }

    pub fn print_playlist(&self, name: &str, track_count: usize) {
        println!("📋 Playlist: {} ({} tracks)\n", name, track_count);
    }

    pub fn print_success(&self, result: &DownloadResult) {
        let file_name = result
            .file_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| result.file_path.display().to_string());
        println!("  ✓ {file_name}\n");

        if self.verbose {
            println!("    source: {}\n", result.source_url);
        }
    }

    pub fn print_failure(&self, error: &dyn std::fmt::Display) {
        println!("  ✗ {error}\n");
    }

    pub fn warn(&self, message: &str) {
        eprintln!("Warning: {message}");
    }

    pub fn print_summary(&self, summary: &RunSummary) {
        if summary.failed > 0 {
            println!(
                "Done: {} downloaded, {} failed",
                summary.succeeded, summary.failed
            );
        } else {
            println!("Done: {} downloaded", summary.succeeded);
        }
    }

    pub fn print_error(&self, error: &color_eyre::Report) {
        eprintln!("Error: {}", error);

        if self.verbose {
            eprintln!("\nError details:");
            error.chain().skip(1).for_each(|cause| {
                eprintln!("  caused by: {}", cause);
            });
        }
    }

    /// Progress bar for one acquisition plus the sink feeding it.
    ///
    /// The sink discards regressions so the rendered percentage only
    /// ever moves forward, whatever the engine reports.
    pub fn download_progress(&self) -> (ProgressBar, ProgressSink) {
        let bar = ProgressBar::new(100);
        bar.set_style(
            ProgressStyle::with_template("  [{bar:30.green}] {pos:>3}% {msg}")
                .unwrap()
                .progress_chars("█░ "),
        );

        let sink = {
            let bar = bar.clone();
            let last = Arc::new(Mutex::new(0.0f32));
            ProgressSink::new(move |percent, status| {
                let mut last = last.lock().unwrap();
                if percent < *last {
                    return;
                }
                *last = percent;
                bar.set_position(percent.round() as u64);
                bar.set_message(truncate(status, 40));
            })
        };

        (bar, sink)
    }
}

/// Shorten a string for display
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let cut: String = s.chars().take(max.saturating_sub(3)).collect();
    format!("{cut}...")
}
