//! Tolkien CLI
//!
//! One-shot dashboard operations:
//! - Show the current snapshot
//! - Check backend and cache status
//! - Render the dashboard page to a file
//! - Inspect or clear the snapshot cache

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tolkien_dashboard::format::{format_sol, format_timestamp};
use tolkien_dashboard::{
    format_price, render_dashboard, render_document, Config, HtmlPageView, Page, SnapshotCache,
    Slot, Snapshot, SnapshotSource,
};

#[derive(Parser)]
#[command(name = "tolkien-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Tolkien token dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search the standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// API base URL, overriding the config
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch and show the current snapshot, falling back to the cache
    Show,

    /// Show backend and cache status
    Status,

    /// Render the dashboard page to an HTML file
    Render {
        /// Output path (default: the configured html_path, else stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Render the cached snapshot without fetching
        #[arg(long)]
        offline: bool,
    },

    /// Inspect the snapshot cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum CacheAction {
    /// Print the cached snapshot
    Show,
    /// Remove the cached snapshot
    Clear,
}

/// Where a displayed snapshot came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    Live,
    Cache,
}

impl Origin {
    fn label(&self) -> &'static str {
        match self {
            Origin::Live => "live",
            Origin::Cache => "cached",
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = Config::load_from(cli.config.as_deref())?;
    if let Some(url) = &cli.api_url {
        config.api.base_url = Some(url.clone());
    }

    let cache = config.snapshot_cache();

    match cli.command {
        Commands::Show => {
            let Some((snapshot, origin)) = current_snapshot(&config, &cache).await? else {
                eprintln!("No usable snapshot available (backend unreachable and cache empty)");
                std::process::exit(1);
            };

            match cli.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&snapshot)?),
                _ => print_snapshot(&snapshot, origin),
            }
        }

        Commands::Status => {
            println!("Tolkien Dashboard v{}", env!("CARGO_PKG_VERSION"));
            println!();

            let base = config.api.api_base();
            match config.snapshot_source()? {
                Some(source) => match source.health_check().await {
                    Ok(()) => println!("API: {} (ok)", base),
                    Err(e) => println!("API: {} (unreachable: {})", base, e),
                },
                None => println!(
                    "API: disabled (no base URL for host {:?})",
                    config.api.hostname
                ),
            }

            println!();
            println!("Cache:");
            println!("  Directory: {}", config.cache.dir);
            println!("  Key: {}", cache.key());
            match cache.try_load() {
                Ok(Some(snapshot)) => {
                    println!("  Snapshot: present");
                    println!("  Price: {}", format_price(snapshot.price_usd));
                    println!("  Transactions: {}", snapshot.transactions.len());
                    println!(
                        "  Usable: {}",
                        if snapshot.is_usable() { "yes" } else { "no" }
                    );
                }
                Ok(None) => println!("  Snapshot: none"),
                Err(e) => println!("  Snapshot: unreadable ({})", e),
            }

            println!();
            println!("Poll interval: {}s", config.poll.interval().as_secs());
        }

        Commands::Render { output, offline } => {
            let found = if offline {
                cache.load().map(|s| (s, Origin::Cache))
            } else {
                current_snapshot(&config, &cache).await?
            };

            let Some((snapshot, origin)) = found else {
                eprintln!("No usable snapshot to render");
                std::process::exit(1);
            };

            let mut view = HtmlPageView::new(None);
            render_dashboard(&snapshot, &mut view);

            match output.or_else(|| config.output.html_path()) {
                Some(path) => {
                    view.write_to(&path)?;
                    println!("Rendered {} snapshot to {:?}", origin.label(), path);
                }
                None => println!("{}", render_document(view.page())),
            }
        }

        Commands::Cache { action } => match action {
            CacheAction::Show => match cache.try_load()? {
                Some(snapshot) => match cli.format.as_str() {
                    "json" => println!("{}", serde_json::to_string_pretty(&snapshot)?),
                    _ => print_snapshot(&snapshot, Origin::Cache),
                },
                None => {
                    println!("No cached snapshot.");
                    println!();
                    println!("Populate the cache with:");
                    println!("  tolkien-cli show");
                }
            },
            CacheAction::Clear => {
                cache.clear()?;
                println!("Cleared cached snapshot ({})", cache.key());
            }
        },

        Commands::Config { output } => {
            let content = tolkien_dashboard::config::generate_default_config();

            match output {
                Some(path) => {
                    std::fs::write(&path, &content)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", content);
                }
            }
        }
    }

    Ok(())
}

/// Fetch a live snapshot, caching it when usable; otherwise use the cache
async fn current_snapshot(
    config: &Config,
    cache: &SnapshotCache,
) -> Result<Option<(Snapshot, Origin)>, Box<dyn std::error::Error>> {
    if let Some(source) = config.snapshot_source()? {
        match source.fetch().await {
            Ok(snapshot) if snapshot.is_usable() => {
                cache.save(&snapshot);
                return Ok(Some((snapshot, Origin::Live)));
            }
            Ok(_) => eprintln!("Backend returned an empty snapshot; using cache"),
            Err(e) => eprintln!("Fetch from {} failed: {}; using cache", source.base_url(), e),
        }
    }

    Ok(cache.load().map(|s| (s, Origin::Cache)))
}

fn print_snapshot(snapshot: &Snapshot, origin: Origin) {
    let mut page = Page::dashboard();
    render_dashboard(snapshot, &mut page);

    let rows = [
        ("Price", Slot::Price),
        ("Volume change", Slot::Volume),
        ("Buy-backs", Slot::Buybacks),
        ("Burned", Slot::Burned),
        ("Market cap", Slot::MarketCap),
        ("Next goal", Slot::GoalLabel),
        ("Goal progress", Slot::GoalPercent),
        ("Supply burned", Slot::BurnPercent),
        ("Contract", Slot::ContractAddress),
    ];

    println!("Tolkien ({})", origin.label());
    println!("{}", "-".repeat(40));
    for (label, slot) in rows {
        println!("{:<20} {}", label, page.text(slot).unwrap_or("-"));
    }

    println!();
    if snapshot.transactions.is_empty() {
        println!("No recent transactions.");
        return;
    }

    println!(
        "{:<24} {:<10} {:<14} {:<10} {}",
        "Time", "Kind", "Amount", "Status", "Signature"
    );
    println!("{}", "-".repeat(80));
    for tx in &snapshot.transactions {
        println!(
            "{:<24} {:<10} {:<14} {:<10} {}",
            format_timestamp(tx.timestamp.as_deref()),
            tx.kind,
            format_sol(tx.amount_sol),
            tx.status.as_deref().unwrap_or("-"),
            tx.signature_str().unwrap_or("-")
        );
    }
}
