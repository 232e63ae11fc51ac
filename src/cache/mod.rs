//! Snapshot Cache
//!
//! Durable single-slot cache for the last usable snapshot, so a restart
//! renders the last known-good values instead of zeros.
//!
//! - **store**: `KeyValueStore` trait with file and in-memory backends
//! - **error**: Error types
//!
//! The slot is overwritten on every usable fetch; nothing is merged or
//! appended. Failures are logged and swallowed: a corrupt or unreadable slot
//! reads as "no cache", a failed write leaves rendering unaffected.

pub mod error;
pub mod store;

pub use error::{CacheError, CacheResult};
pub use store::{FileStore, KeyValueStore, MemoryStore};

use std::sync::Arc;

use crate::snapshot::Snapshot;

/// Storage key of the snapshot slot
pub const CACHE_KEY: &str = "tolkien_dashboard_cache_v1";

/// Scoped access to the snapshot slot of a key-value store
#[derive(Clone)]
pub struct SnapshotCache {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl SnapshotCache {
    /// Cache using the default slot key
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(store, CACHE_KEY)
    }

    pub fn with_key(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// In-memory cache, nothing survives the process
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the cached snapshot, propagating errors
    pub fn try_load(&self) -> CacheResult<Option<Snapshot>> {
        match self.store.get(&self.key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Read the cached snapshot; any failure reads as no cache
    pub fn load(&self) -> Option<Snapshot> {
        match self.try_load() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Ignoring unreadable snapshot cache");
                None
            }
        }
    }

    /// Overwrite the slot, propagating errors
    pub fn try_save(&self, snapshot: &Snapshot) -> CacheResult<()> {
        let raw = serde_json::to_string(snapshot)?;
        self.store.set(&self.key, &raw)
    }

    /// Overwrite the slot; failures are logged and ignored
    pub fn save(&self, snapshot: &Snapshot) {
        if let Err(e) = self.try_save(snapshot) {
            tracing::warn!(key = %self.key, error = %e, "Failed to persist snapshot cache");
        }
    }

    /// Drop the cached snapshot
    pub fn clear(&self) -> CacheResult<()> {
        self.store.remove(&self.key)
    }
}

impl std::fmt::Debug for SnapshotCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapshotCache")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::Transaction;

    /// Store whose every operation fails
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> CacheResult<Option<String>> {
            Err(CacheError::Unavailable("disk gone".to_string()))
        }

        fn set(&self, _key: &str, _value: &str) -> CacheResult<()> {
            Err(CacheError::Unavailable("disk gone".to_string()))
        }

        fn remove(&self, _key: &str) -> CacheResult<()> {
            Err(CacheError::Unavailable("disk gone".to_string()))
        }
    }

    fn snapshot() -> Snapshot {
        Snapshot {
            price_usd: 0.000123,
            market_cap_usd: 45_000.0,
            transactions: vec![Transaction::new("burn", 2.5).signature("sig")],
            ..Snapshot::default()
        }
    }

    #[test]
    fn test_save_then_load() {
        let cache = SnapshotCache::in_memory();
        assert_eq!(cache.load(), None);

        cache.save(&snapshot());
        assert_eq!(cache.load(), Some(snapshot()));
    }

    #[test]
    fn test_save_overwrites_slot() {
        let cache = SnapshotCache::in_memory();
        cache.save(&snapshot());

        let newer = Snapshot {
            price_usd: 1.0,
            ..Snapshot::default()
        };
        cache.save(&newer);
        assert_eq!(cache.load(), Some(newer));
    }

    #[test]
    fn test_corrupt_slot_reads_as_empty() {
        let store = Arc::new(MemoryStore::new());
        store.set(CACHE_KEY, "{not json").unwrap();

        let cache = SnapshotCache::new(store);
        assert!(cache.try_load().is_err());
        assert_eq!(cache.load(), None);
    }

    #[test]
    fn test_broken_store_is_not_fatal() {
        let cache = SnapshotCache::new(Arc::new(BrokenStore));
        cache.save(&snapshot());
        assert_eq!(cache.load(), None);
        assert!(cache.try_save(&snapshot()).is_err());
    }

    #[test]
    fn test_clear() {
        let cache = SnapshotCache::in_memory();
        cache.save(&snapshot());
        cache.clear().unwrap();
        assert_eq!(cache.load(), None);
    }

    #[test]
    fn test_default_key() {
        assert_eq!(SnapshotCache::in_memory().key(), "tolkien_dashboard_cache_v1");
    }
}
