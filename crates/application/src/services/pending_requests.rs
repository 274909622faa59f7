use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use rustc_hash::FxBuildHasher;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::task::AbortHandle;
use tracing::warn;

/// A client query that has been forwarded upstream and not yet answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub client: SocketAddr,
    pub query_id: u16,
    pub upstream_index: usize,
    pub attempts: u32,
}

/// Result of moving a pending request past a timed-out upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Resend to the upstream at this index.
    Next(usize),
    /// Every upstream has been tried.
    Exhausted,
    /// The entry was answered or replaced in the meantime.
    Stale,
}

struct Slot {
    request: PendingRequest,
    generation: u64,
    timer: Option<AbortHandle>,
}

/// In-flight upstream queries keyed by DNS query identifier.
///
/// Every mutation goes through a single DashMap entry operation, so a
/// timer firing and a response arriving for the same identifier cannot both
/// act on the same entry. Each registration gets a fresh generation number;
/// timer-side operations carry it and become no-ops against a replacement.
pub struct PendingRequestTable {
    entries: DashMap<u16, Slot, FxBuildHasher>,
    next_generation: AtomicU64,
}

impl PendingRequestTable {
    pub fn new() -> Self {
        Self {
            entries: DashMap::with_hasher(FxBuildHasher),
            next_generation: AtomicU64::new(1),
        }
    }

    /// Inserts a fresh entry at upstream index 0 and returns its generation.
    /// An existing entry for the same identifier is replaced and its timer
    /// cancelled.
    pub fn register(&self, query_id: u16, client: SocketAddr) -> u64 {
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        let slot = Slot {
            request: PendingRequest {
                client,
                query_id,
                upstream_index: 0,
                attempts: 0,
            },
            generation,
            timer: None,
        };

        if let Some(previous) = self.entries.insert(query_id, slot) {
            warn!(
                query_id,
                previous_client = %previous.request.client,
                client = %client,
                "Query id already pending, replacing entry"
            );
            if let Some(timer) = previous.timer {
                timer.abort();
            }
        }

        generation
    }

    /// Attaches the failover task to its entry. The task is aborted right
    /// away when the entry is already gone or belongs to a newer generation.
    pub fn attach_timer(&self, query_id: u16, generation: u64, timer: AbortHandle) {
        match self.entries.get_mut(&query_id) {
            Some(mut slot) if slot.generation == generation => {
                slot.timer = Some(timer);
            }
            _ => timer.abort(),
        }
    }

    pub fn advance(&self, query_id: u16, generation: u64, upstream_count: usize) -> Advance {
        let Some(mut slot) = self.entries.get_mut(&query_id) else {
            return Advance::Stale;
        };
        if slot.generation != generation {
            return Advance::Stale;
        }

        slot.request.attempts += 1;
        slot.request.upstream_index += 1;

        if slot.request.upstream_index < upstream_count {
            Advance::Next(slot.request.upstream_index)
        } else {
            Advance::Exhausted
        }
    }

    /// Removes the entry on behalf of a matching upstream response and
    /// cancels its failover task.
    pub fn retire(&self, query_id: u16) -> Option<PendingRequest> {
        let (_, slot) = self.entries.remove(&query_id)?;
        if let Some(timer) = slot.timer {
            timer.abort();
        }
        Some(slot.request)
    }

    /// Removes an exhausted entry from inside its own failover task. Does
    /// nothing if the entry was retired or replaced first.
    pub fn expire(&self, query_id: u16, generation: u64) -> Option<PendingRequest> {
        match self.entries.entry(query_id) {
            Entry::Occupied(occupied) if occupied.get().generation == generation => {
                Some(occupied.remove().request)
            }
            _ => None,
        }
    }

    pub fn get(&self, query_id: u16) -> Option<PendingRequest> {
        self.entries.get(&query_id).map(|slot| slot.request.clone())
    }

    pub fn contains(&self, query_id: u16) -> bool {
        self.entries.contains_key(&query_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for PendingRequestTable {
    fn default() -> Self {
        Self::new()
    }
}
