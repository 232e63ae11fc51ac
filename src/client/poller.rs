//! Dashboard Poller
//!
//! Owns the render loop: renders the cached snapshot at startup, then
//! fetches on a fixed interval and renders every usable result.
//!
//! Ticks never wait for each other, so requests can overlap. Each refresh
//! takes a sequence number when it starts; a response older than the last
//! applied one is dropped, so a slow request cannot roll the page back.

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::task::{JoinHandle, JoinSet};

use super::SnapshotSource;
use crate::cache::SnapshotCache;
use crate::format::format_price;
use crate::render::{render_dashboard, DashboardView};
use crate::snapshot::Snapshot;

/// Default time between refreshes
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Shortest accepted interval; tokio timers reject zero periods
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Keeps a dashboard view current
pub struct DashboardClient<V> {
    /// `None` when no API base is configured
    source: Option<Arc<dyn SnapshotSource>>,
    cache: SnapshotCache,
    view: Arc<Mutex<V>>,
    state: Arc<RwLock<ClientState>>,
    next_seq: AtomicU64,
    interval: Duration,
}

/// What the client last showed and how fetching is going
#[derive(Debug, Clone, Default)]
pub struct ClientState {
    /// Snapshot currently rendered
    pub last_snapshot: Option<Snapshot>,
    /// Sequence number of the refresh that produced `last_snapshot`; 0 for cache
    pub last_applied_seq: u64,
    /// When a fetched snapshot was last applied
    pub last_applied_at: Option<DateTime<Utc>>,
    /// Whether the current render came from the cache
    pub from_cache: bool,
    /// Failed fetches since the last successful one
    pub consecutive_failures: u32,
}

/// Result of one refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Snapshot cached and rendered
    Applied,
    /// Snapshot looked like a placeholder and was dropped
    Unusable,
    /// A newer refresh was already applied
    Stale,
    /// Fetch failed (transport, status or decode)
    Failed,
    /// No API base configured
    Disabled,
}

impl<V> DashboardClient<V>
where
    V: DashboardView + Send + 'static,
{
    /// Create a client. With `source` of `None` refreshes are no-ops.
    pub fn new(view: V, cache: SnapshotCache, source: Option<Arc<dyn SnapshotSource>>) -> Self {
        Self {
            source,
            cache,
            view: Arc::new(Mutex::new(view)),
            state: Arc::new(RwLock::new(ClientState::default())),
            next_seq: AtomicU64::new(0),
            interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Builder method: set the poll interval, floored at [`MIN_POLL_INTERVAL`]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval.max(MIN_POLL_INTERVAL);
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether a snapshot source is configured
    pub fn is_enabled(&self) -> bool {
        self.source.is_some()
    }

    pub fn cache(&self) -> &SnapshotCache {
        &self.cache
    }

    /// Shared handle to the view
    pub fn view(&self) -> Arc<Mutex<V>> {
        Arc::clone(&self.view)
    }

    /// Current client state
    pub async fn state(&self) -> ClientState {
        self.state.read().await.clone()
    }

    /// Render the cached snapshot, if there is one.
    ///
    /// Returns whether anything was rendered. Does nothing once a fetched
    /// snapshot has been applied.
    pub async fn render_cached(&self) -> bool {
        let Some(snapshot) = self.cache.load() else {
            tracing::debug!("No cached snapshot to render");
            return false;
        };

        let mut state = self.state.write().await;
        if state.last_applied_seq > 0 {
            return false;
        }

        {
            let mut view = self.view.lock().await;
            render_dashboard(&snapshot, &mut *view);
        }

        tracing::info!(
            price = %format_price(snapshot.price_usd),
            transactions = snapshot.transactions.len(),
            "Rendered cached snapshot"
        );

        state.last_snapshot = Some(snapshot);
        state.from_cache = true;
        true
    }

    /// Fetch once and render the result if it is usable and not stale.
    ///
    /// Never fails: every error is logged and the previous render stands.
    pub async fn refresh(&self) -> RefreshOutcome {
        let Some(source) = &self.source else {
            tracing::debug!("No API base configured, skipping fetch");
            return RefreshOutcome::Disabled;
        };

        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst) + 1;

        match source.fetch().await {
            Ok(snapshot) if snapshot.is_usable() => self.apply(seq, snapshot).await,
            Ok(_) => {
                self.state.write().await.consecutive_failures = 0;
                tracing::debug!(seq, "Discarding unusable snapshot");
                RefreshOutcome::Unusable
            }
            Err(e) => {
                let failures = {
                    let mut state = self.state.write().await;
                    state.consecutive_failures += 1;
                    state.consecutive_failures
                };
                tracing::warn!(
                    seq,
                    source = %source.name(),
                    failures,
                    error = %e,
                    "Dashboard fetch failed"
                );
                RefreshOutcome::Failed
            }
        }
    }

    async fn apply(&self, seq: u64, snapshot: Snapshot) -> RefreshOutcome {
        let mut state = self.state.write().await;
        if seq <= state.last_applied_seq {
            tracing::debug!(
                seq,
                applied = state.last_applied_seq,
                "Discarding stale snapshot"
            );
            return RefreshOutcome::Stale;
        }

        self.cache.save(&snapshot);
        {
            let mut view = self.view.lock().await;
            render_dashboard(&snapshot, &mut *view);
        }

        tracing::info!(
            seq,
            price = %format_price(snapshot.price_usd),
            market_cap = snapshot.market_cap_usd,
            transactions = snapshot.transactions.len(),
            "Dashboard updated"
        );

        state.last_snapshot = Some(snapshot);
        state.last_applied_seq = seq;
        state.last_applied_at = Some(Utc::now());
        state.from_cache = false;
        state.consecutive_failures = 0;
        RefreshOutcome::Applied
    }

    /// Start polling in the background.
    ///
    /// The first tick fires immediately. Each tick spawns an independent
    /// refresh; stopping the handle aborts the loop and any in-flight
    /// refreshes.
    pub fn start(self: Arc<Self>) -> PollHandle {
        tracing::info!(
            interval_ms = self.interval.as_millis() as u64,
            enabled = self.is_enabled(),
            "Starting dashboard polling"
        );

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            let mut in_flight = JoinSet::new();

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let client = Arc::clone(&self);
                        in_flight.spawn(async move { client.refresh().await });
                    }
                    Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                        if let Err(e) = joined {
                            if e.is_panic() {
                                tracing::error!(error = %e, "Dashboard refresh panicked");
                            }
                        }
                    }
                }
            }
        });

        PollHandle { task }
    }
}

/// Handle to a running poll loop
#[derive(Debug)]
pub struct PollHandle {
    task: JoinHandle<()>,
}

impl PollHandle {
    /// Stop polling. In-flight refreshes are cancelled.
    pub fn stop(self) {
        self.task.abort();
        tracing::info!("Dashboard polling stopped");
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}
