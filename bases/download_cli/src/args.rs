// bases/download_cli/src/args.rs
use clap::Parser;
use std::path::PathBuf;

/// Download music from YouTube, with Spotify playlist expansion
///
/// Inputs may be song names, YouTube URLs, Spotify track URLs or
/// Spotify playlist URLs; playlists are expanded to one download per
/// track.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Song references: names, YouTube URLs, Spotify track/playlist URLs
    pub songs: Vec<String>,

    /// Text file with songs, one per line (# comments and blanks skipped)
    #[arg(short = 'f', long)]
    pub input_file: Option<PathBuf>,

    /// Directory to store downloaded files
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Spotify client id (defaults to SPOTIFY_CLIENT_ID, .env supported)
    #[arg(long)]
    pub spotify_id: Option<String>,

    /// Spotify client secret (defaults to SPOTIFY_CLIENT_SECRET)
    #[arg(long)]
    pub spotify_secret: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
