// bases/download_cli/src/main.rs
mod app;
mod args;
mod config;
mod expand;
mod output;

use clap::Parser;
use color_eyre::Result;
use tokio_util::sync::CancellationToken;

use app::App;
use args::Args;
use config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional and loaded silently
    let _ = dotenvy::dotenv();

    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "download_cli=info,media_downloader=warn,spotify_catalog=warn".into()
            }),
        )
        .init();

    let args = Args::parse();
    let config = Config::from_args(args);

    // One shared cancellation handle; ctrl-c cancels every suspension
    // point down the call chain and kills any running subprocess.
    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                eprintln!("\nCancelling...");
                cancel.cancel();
            }
        }
    });

    let app = App::new(config);
    match app.run(&cancel).await {
        Ok(summary) if summary.is_success() => Ok(()),
        Ok(_) => std::process::exit(1),
        Err(error) => {
            app.print_error(&error);
            std::process::exit(1);
        }
    }
}
