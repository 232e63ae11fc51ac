//! Tolkien Dashboard daemon
//!
//! Renders the cached snapshot, then polls the dashboard API and rewrites the
//! HTML page until interrupted.

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tolkien_dashboard::{logging, Config, DashboardClient, HtmlPageView, SnapshotSource};

#[derive(Parser)]
#[command(name = "tolkien-dashboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Live Tolkien token dashboard")]
struct Args {
    /// Config file (default: search the standard locations)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// HTML output path, overriding the config
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = Config::load_from(args.config.as_deref())?;

    logging::init(&config.logging);

    tracing::info!("Tolkien Dashboard v{}", env!("CARGO_PKG_VERSION"));

    let source: Option<Arc<dyn SnapshotSource>> = match config.snapshot_source()? {
        Some(source) => {
            tracing::info!("API base: {}", source.base_url());
            Some(Arc::new(source))
        }
        None => {
            tracing::warn!(
                hostname = %config.api.hostname,
                "No API base configured; showing cached data only"
            );
            None
        }
    };

    let cache = config.snapshot_cache();
    tracing::info!("Cache directory: {}", config.cache.dir);

    let html_path = args.output.or_else(|| config.output.html_path());
    match &html_path {
        Some(path) => tracing::info!("Writing dashboard to {:?}", path),
        None => tracing::info!("No output path; dashboard kept in memory"),
    }

    let client = Arc::new(
        DashboardClient::new(HtmlPageView::new(html_path), cache, source)
            .with_interval(config.poll.interval()),
    );

    client.render_cached().await;

    let handle = Arc::clone(&client).start();
    tracing::info!("Polling every {:?}", client.interval());

    tokio::signal::ctrl_c().await?;

    tracing::info!("Shutting down...");
    handle.stop();

    let state = client.state().await;
    tracing::info!(
        consecutive_failures = state.consecutive_failures,
        "Tolkien Dashboard stopped"
    );
    Ok(())
}
