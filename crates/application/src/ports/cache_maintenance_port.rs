use async_trait::async_trait;
use tierdns_domain::DomainError;

/// Outcome of a cache sweep cycle.
#[derive(Debug, Default, Clone)]
pub struct CacheSweepOutcome {
    pub entries_removed: usize,
    pub cache_size: usize,
}

/// Port for purging expired keys from the cache store.
#[async_trait]
pub trait CacheMaintenancePort: Send + Sync {
    async fn sweep_expired(&self) -> Result<CacheSweepOutcome, DomainError>;
}
