use async_trait::async_trait;
use dashmap::DashMap;
use rustc_hash::FxBuildHasher;
use std::time::Duration;
use tierdns_application::ports::{CacheMaintenancePort, CacheStore, CacheSweepOutcome};
use tierdns_domain::DomainError;
use tokio::time::Instant;
use tracing::debug;

struct StoredValue {
    value: String,
    expires_at: Instant,
}

impl StoredValue {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// In-process key/value store with per-key expiry.
///
/// Reads never return an expired value. Expired keys are dropped lazily on
/// read and in bulk by [`CacheMaintenancePort::sweep_expired`].
pub struct MemoryCacheStore {
    entries: DashMap<String, StoredValue, FxBuildHasher>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self {
            entries: DashMap::with_hasher(FxBuildHasher),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MemoryCacheStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        let now = Instant::now();

        match self.entries.get(key) {
            None => return Ok(None),
            Some(stored) if !stored.is_expired(now) => return Ok(Some(stored.value.clone())),
            Some(_) => {}
        }

        self.entries.remove_if(key, |_, stored| stored.is_expired(now));
        Ok(None)
    }

    async fn set_with_expiry(
        &self,
        key: &str,
        value: String,
        ttl_secs: u64,
    ) -> Result<(), DomainError> {
        if ttl_secs == 0 {
            self.entries.remove(key);
            return Ok(());
        }

        let expires_at = Instant::now() + Duration::from_secs(ttl_secs);
        self.entries
            .insert(key.to_string(), StoredValue { value, expires_at });
        Ok(())
    }
}

#[async_trait]
impl CacheMaintenancePort for MemoryCacheStore {
    async fn sweep_expired(&self) -> Result<CacheSweepOutcome, DomainError> {
        let now = Instant::now();
        let before = self.entries.len();

        self.entries.retain(|_, stored| !stored.is_expired(now));

        let cache_size = self.entries.len();
        let entries_removed = before.saturating_sub(cache_size);
        debug!(entries_removed, cache_size, "Expired cache keys swept");

        Ok(CacheSweepOutcome {
            entries_removed,
            cache_size,
        })
    }
}
