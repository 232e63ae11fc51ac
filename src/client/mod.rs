//! Dashboard API Client
//!
//! Fetches snapshots from the dashboard backend and keeps the page current.
//!
//! ## Architecture
//!
//! - **resolve_api_base**: picks the backend URL from host and override
//! - **SnapshotSource**: one fetch of the current snapshot (HTTP in production)
//! - **DashboardClient**: cache-first startup render, then periodic refresh
//!
//! ## Data Flow
//!
//! 1. Startup renders the cached snapshot, if any
//! 2. Every tick fetches `GET {API_BASE}/dashboard`
//! 3. Usable, non-stale snapshots are cached and rendered
//! 4. Everything else is logged and dropped; the last render stands

mod error;
mod http;
mod poller;

pub use error::FetchError;
pub use http::{HttpSnapshotSource, DASHBOARD_PATH, HEALTH_PATH};
pub use poller::{
    ClientState, DashboardClient, PollHandle, RefreshOutcome, DEFAULT_POLL_INTERVAL,
    MIN_POLL_INTERVAL,
};

use async_trait::async_trait;

use crate::snapshot::Snapshot;

/// Backend used for local development when the page is served from loopback
pub const LOCAL_DEV_API_BASE: &str = "http://127.0.0.1:8000";

/// Resolve the API base URL.
///
/// An override wins when set. Without one, loopback hosts (`localhost`,
/// `127.*`) use [`LOCAL_DEV_API_BASE`] and every other host gets an empty
/// base, which disables fetching. Trailing slashes are stripped.
pub fn resolve_api_base(hostname: &str, override_base: Option<&str>) -> String {
    let override_base = override_base.map(str::trim).filter(|s| !s.is_empty());

    let base = match override_base {
        Some(base) => base,
        None if is_loopback(hostname) => LOCAL_DEV_API_BASE,
        None => "",
    };

    base.trim_end_matches('/').to_string()
}

/// Whether a hostname points at the local machine
pub fn is_loopback(hostname: &str) -> bool {
    hostname == "localhost" || hostname.starts_with("127.")
}

/// A source of dashboard snapshots
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Fetch the current snapshot
    async fn fetch(&self) -> Result<Snapshot, FetchError>;
}
