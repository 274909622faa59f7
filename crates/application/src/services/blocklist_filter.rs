use crate::ports::BlocklistRepository;
use arc_swap::ArcSwap;
use rustc_hash::FxHashSet;
use std::sync::Arc;
use tierdns_domain::{normalize_name, DomainError};
use tracing::info;

/// In-memory mirror of the `blocklist` collection.
///
/// `load` builds a complete new set and swaps it in, so readers see either
/// the old set or the new one, never a partial rebuild. A failed load keeps
/// the previous set.
pub struct BlocklistFilter {
    repository: Arc<dyn BlocklistRepository>,
    blocked: ArcSwap<FxHashSet<String>>,
}

impl BlocklistFilter {
    pub fn new(repository: Arc<dyn BlocklistRepository>) -> Self {
        Self {
            repository,
            blocked: ArcSwap::from_pointee(FxHashSet::default()),
        }
    }

    pub async fn load(&self) -> Result<usize, DomainError> {
        let entries = self.repository.get_all().await?;

        let set: FxHashSet<String> = entries
            .into_iter()
            .map(|entry| normalize_name(&entry.name))
            .collect();
        let count = set.len();

        self.blocked.store(Arc::new(set));
        info!(domains = count, "Blocklist loaded");
        Ok(count)
    }

    /// Exact membership test against a normalized name.
    pub fn is_blocked(&self, name: &str) -> bool {
        self.blocked.load().contains(name)
    }

    pub fn len(&self) -> usize {
        self.blocked.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocked.load().is_empty()
    }
}
