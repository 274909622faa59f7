#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tierdns_application::ports::{BlocklistRepository, CacheMaintenancePort, CacheSweepOutcome};
use tierdns_domain::{BlockedDomain, DomainError};
use tokio::sync::RwLock;

pub struct MockCacheMaintenancePort {
    sweep_count: Arc<AtomicU64>,
    should_fail: Arc<AtomicBool>,
    outcome: CacheSweepOutcome,
}

impl MockCacheMaintenancePort {
    pub fn new() -> Self {
        Self {
            sweep_count: Arc::new(AtomicU64::new(0)),
            should_fail: Arc::new(AtomicBool::new(false)),
            outcome: CacheSweepOutcome::default(),
        }
    }

    pub fn with_outcome(mut self, outcome: CacheSweepOutcome) -> Self {
        self.outcome = outcome;
        self
    }

    pub fn sweep_count(&self) -> u64 {
        self.sweep_count.load(Ordering::Relaxed)
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::Relaxed);
    }
}

#[async_trait]
impl CacheMaintenancePort for MockCacheMaintenancePort {
    async fn sweep_expired(&self) -> Result<CacheSweepOutcome, DomainError> {
        self.sweep_count.fetch_add(1, Ordering::Relaxed);
        if self.should_fail.load(Ordering::Relaxed) {
            return Err(DomainError::CacheError("sweep failed".to_string()));
        }
        Ok(self.outcome.clone())
    }
}

pub struct MockBlocklistRepository {
    domains: Arc<RwLock<Vec<BlockedDomain>>>,
    call_count: Arc<AtomicU64>,
    should_fail: Arc<AtomicBool>,
}

impl MockBlocklistRepository {
    pub fn new() -> Self {
        Self {
            domains: Arc::new(RwLock::new(Vec::new())),
            call_count: Arc::new(AtomicU64::new(0)),
            should_fail: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn set_domains(&self, domains: &[&str]) {
        *self.domains.write().await = domains.iter().map(|d| BlockedDomain::new(d)).collect();
    }

    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::Relaxed)
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::Relaxed);
    }
}

#[async_trait]
impl BlocklistRepository for MockBlocklistRepository {
    async fn get_all(&self) -> Result<Vec<BlockedDomain>, DomainError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if self.should_fail.load(Ordering::Relaxed) {
            return Err(DomainError::DatabaseError("blocklist unavailable".to_string()));
        }
        Ok(self.domains.read().await.clone())
    }
}
