// bases/download_cli/src/config.rs
use crate::args::Args;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct SpotifyCredentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Run configuration resolved from CLI arguments and the environment
#[derive(Debug, Clone)]
pub struct Config {
    pub output_dir: PathBuf,
    pub songs: Vec<String>,
    pub input_file: Option<PathBuf>,
    /// Present only when both halves of the credential pair are set
    pub credentials: Option<SpotifyCredentials>,
    pub verbose: bool,
}

impl Config {
    /// Create configuration from CLI arguments.
    ///
    /// Flags win over the SPOTIFY_CLIENT_ID / SPOTIFY_CLIENT_SECRET
    /// environment variables (which dotenvy may have loaded from .env).
    pub fn from_args(args: Args) -> Self {
        let client_id = args
            .spotify_id
            .or_else(|| std::env::var("SPOTIFY_CLIENT_ID").ok());
        let client_secret = args
            .spotify_secret
            .or_else(|| std::env::var("SPOTIFY_CLIENT_SECRET").ok());

        let credentials = match (client_id, client_secret) {
            (Some(client_id), Some(client_secret))
                if !client_id.is_empty() && !client_secret.is_empty() =>
            {
                Some(SpotifyCredentials {
                    client_id,
                    client_secret,
                })
            }
            _ => None,
        };

        Self {
            output_dir: args.output_dir,
            songs: args.songs,
            input_file: args.input_file,
            credentials,
            verbose: args.verbose,
        }
    }
}
