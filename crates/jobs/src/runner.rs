use crate::{BlocklistSyncJob, CacheMaintenanceJob};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Starts the configured background jobs. Each job spawns its own loop, so
/// `start` returns as soon as they are running.
#[derive(Default)]
pub struct JobRunner {
    blocklist_sync: Option<BlocklistSyncJob>,
    cache_maintenance: Option<CacheMaintenanceJob>,
    shutdown: Option<CancellationToken>,
}

impl JobRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blocklist_sync(mut self, job: BlocklistSyncJob) -> Self {
        self.blocklist_sync = Some(job);
        self
    }

    pub fn with_cache_maintenance(mut self, job: CacheMaintenanceJob) -> Self {
        self.cache_maintenance = Some(job);
        self
    }

    /// Cancelling `token` stops every job started by this runner.
    pub fn with_shutdown_token(mut self, token: CancellationToken) -> Self {
        self.shutdown = Some(token);
        self
    }

    pub async fn start(self) {
        let mut started = 0usize;

        if let Some(mut job) = self.blocklist_sync {
            if let Some(token) = &self.shutdown {
                job = job.with_cancellation(token.clone());
            }
            Arc::new(job).start().await;
            started += 1;
        }

        if let Some(mut job) = self.cache_maintenance {
            if let Some(token) = &self.shutdown {
                job = job.with_cancellation(token.clone());
            }
            Arc::new(job).start().await;
            started += 1;
        }

        info!(jobs = started, "Background jobs started");
    }
}
