//! # Tolkien Dashboard
//!
//! Polls the Tolkien backend for token and market statistics and renders
//! them into a dashboard page, keeping the last good snapshot in a durable
//! cache so the page never falls back to zeros.
//!
//! ## Features
//!
//! - **Cache-first**: the last usable snapshot renders before the first fetch
//! - **Usability check**: placeholder (all-zero) responses are ignored
//! - **Ordered updates**: stale responses from overlapping requests are dropped
//! - **Partial pages**: slots without an element are skipped
//!
//! ## Modules
//!
//! - [`snapshot`]: Snapshot and transaction model
//! - [`format`]: Price, USD, percent and time formatting
//! - [`render`]: Slot renderer, in-memory page and HTML export
//! - [`cache`]: Durable single-slot snapshot cache
//! - [`client`]: HTTP source and the polling client
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tolkien_dashboard::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let base = resolve_api_base("localhost", None);
//!     let source: Arc<dyn SnapshotSource> =
//!         Arc::new(HttpSnapshotSource::new(base, std::time::Duration::from_secs(10))?);
//!
//!     let cache = SnapshotCache::new(Arc::new(FileStore::new("./cache")));
//!     let view = HtmlPageView::new(Some("dashboard.html".into()));
//!
//!     let client = Arc::new(DashboardClient::new(view, cache, Some(source)));
//!     client.render_cached().await;
//!
//!     let handle = Arc::clone(&client).start();
//!     tokio::signal::ctrl_c().await?;
//!     handle.stop();
//!
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod client;
pub mod config;
pub mod format;
pub mod logging;
pub mod render;
pub mod snapshot;

// Re-export top-level types for convenience
pub use snapshot::{is_usable, Snapshot, Transaction, TxKind};

pub use format::{clamp_width, format_pct, format_price, format_usd};

pub use render::{
    render_dashboard, render_document, DashboardView, Element, HtmlPageView, Page, Slot,
};

pub use cache::{CacheError, FileStore, KeyValueStore, MemoryStore, SnapshotCache, CACHE_KEY};

pub use client::{
    resolve_api_base, ClientState, DashboardClient, FetchError, HttpSnapshotSource, PollHandle,
    RefreshOutcome, SnapshotSource,
};

pub use config::{Config, ConfigError, LoggingConfig};
