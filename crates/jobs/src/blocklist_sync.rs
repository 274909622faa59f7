use std::sync::Arc;
use std::time::Duration;
use tierdns_application::services::BlocklistFilter;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

const DEFAULT_INTERVAL_SECS: u64 = 3600;

/// Periodically rebuilds the in-memory blocklist from the store.
///
/// The first tick is consumed up front: the filter is loaded once during
/// startup, so the first reload happens one interval later.
pub struct BlocklistSyncJob {
    filter: Arc<BlocklistFilter>,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl BlocklistSyncJob {
    pub fn new(filter: Arc<BlocklistFilter>) -> Self {
        Self {
            filter,
            interval_secs: DEFAULT_INTERVAL_SECS,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval_secs: u64) -> Self {
        self.interval_secs = interval_secs;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(
            interval_secs = self.interval_secs,
            "Starting blocklist sync job"
        );

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("BlocklistSyncJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        match self.filter.load().await {
                            Ok(domains) => info!(domains, "BlocklistSyncJob: reload completed"),
                            Err(e) => error!(error = %e, "BlocklistSyncJob: reload failed, keeping previous set"),
                        }
                    }
                }
            }
        });
    }
}
