use crate::ports::CacheStore;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tierdns_domain::{
    normalize_name, DomainError, RRset, RecordData, RecordType, ResourceAnswer,
};
use tracing::{debug, warn};

/// Serialized form of one cached record set.
#[derive(Debug, Serialize, Deserialize)]
struct CachedRRset {
    ttl: u32,
    data: Vec<RecordData>,
}

/// TTL-bounded answer cache on top of a [`CacheStore`].
///
/// Entries live under `"<name>:<TYPE>"`. A CNAME entry doubles as the alias
/// pointer used to follow chains when the exact key is missing.
pub struct ResponseCache {
    store: Arc<dyn CacheStore>,
    max_cname_depth: usize,
}

impl ResponseCache {
    pub fn new(store: Arc<dyn CacheStore>, max_cname_depth: usize) -> Self {
        Self {
            store,
            max_cname_depth,
        }
    }

    pub async fn resolve(
        &self,
        name: &str,
        record_type: RecordType,
    ) -> Result<Option<RRset>, DomainError> {
        let mut current = normalize_name(name);
        let mut hops = 0;

        loop {
            let key = format!("{}:{}", current, record_type);
            if let Some(rrset) = self.read_rrset(&key, record_type).await? {
                return Ok(Some(rrset));
            }

            if record_type == RecordType::CNAME {
                return Ok(None);
            }

            let Some(target) = self.read_cname_target(&current).await? else {
                return Ok(None);
            };

            if hops == self.max_cname_depth {
                warn!(
                    domain = %name,
                    max_depth = self.max_cname_depth,
                    "CNAME chain too long, treating as cache miss"
                );
                return Ok(None);
            }

            debug!(from = %current, to = %target, "Following cached CNAME");
            hops += 1;
            current = target;
        }
    }

    /// Groups answers by `(name, type)` and writes one entry per group with
    /// the smallest TTL of the group. Groups whose TTL is not positive are
    /// skipped. Returns the number of entries written.
    pub async fn store(&self, answers: &[ResourceAnswer]) -> usize {
        let mut order: Vec<String> = Vec::new();
        let mut groups: FxHashMap<String, (i64, Vec<RecordData>)> = FxHashMap::default();

        for answer in answers {
            let key = answer.cache_key();
            match groups.get_mut(&key) {
                Some((ttl, data)) => {
                    *ttl = (*ttl).min(answer.ttl);
                    data.push(answer.data.clone());
                }
                None => {
                    order.push(key.clone());
                    groups.insert(key, (answer.ttl, vec![answer.data.clone()]));
                }
            }
        }

        let mut written = 0;
        for key in order {
            let Some((ttl, data)) = groups.remove(&key) else {
                continue;
            };

            if ttl <= 0 {
                debug!(key = %key, ttl, "Skipping non-positive TTL");
                continue;
            }

            let ttl = u32::try_from(ttl).unwrap_or(u32::MAX);
            match self.write_entry(&key, ttl, data).await {
                Ok(()) => written += 1,
                Err(e) => warn!(key = %key, error = %e, "Failed to cache answer"),
            }
        }

        written
    }

    async fn write_entry(
        &self,
        key: &str,
        ttl: u32,
        data: Vec<RecordData>,
    ) -> Result<(), DomainError> {
        let value = serde_json::to_string(&CachedRRset { ttl, data })
            .map_err(|e| DomainError::Serialization(e.to_string()))?;
        self.store
            .set_with_expiry(key, value, u64::from(ttl))
            .await
    }

    async fn read_rrset(
        &self,
        key: &str,
        record_type: RecordType,
    ) -> Result<Option<RRset>, DomainError> {
        let Some(raw) = self.store.get(key).await? else {
            return Ok(None);
        };

        match serde_json::from_str::<CachedRRset>(&raw) {
            Ok(cached) => Ok(Some(RRset::new(record_type, Some(cached.ttl), cached.data))),
            Err(e) => {
                warn!(key = %key, error = %e, "Unreadable cache entry, treating as miss");
                Ok(None)
            }
        }
    }

    /// Canonical name stored under `"<name>:CNAME"`, either as a cached
    /// record set or as a bare JSON string.
    async fn read_cname_target(&self, name: &str) -> Result<Option<String>, DomainError> {
        let key = format!("{}:{}", name, RecordType::CNAME);
        let Some(raw) = self.store.get(&key).await? else {
            return Ok(None);
        };

        if let Ok(cached) = serde_json::from_str::<CachedRRset>(&raw) {
            return Ok(cached
                .data
                .iter()
                .find_map(RecordData::as_name)
                .map(normalize_name));
        }

        match serde_json::from_str::<String>(&raw) {
            Ok(target) => Ok(Some(normalize_name(&target))),
            Err(e) => {
                warn!(key = %key, error = %e, "Unreadable CNAME pointer, treating as miss");
                Ok(None)
            }
        }
    }
}
