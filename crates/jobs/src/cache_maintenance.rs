use std::sync::Arc;
use std::time::Duration;
use tierdns_application::ports::CacheMaintenancePort;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;

/// Purges expired keys from the cache store on a fixed interval.
pub struct CacheMaintenanceJob {
    maintenance: Arc<dyn CacheMaintenancePort>,
    sweep_interval_secs: u64,
    shutdown: CancellationToken,
}

impl CacheMaintenanceJob {
    pub fn new(maintenance: Arc<dyn CacheMaintenancePort>) -> Self {
        Self {
            maintenance,
            sweep_interval_secs: DEFAULT_SWEEP_INTERVAL_SECS,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, sweep_secs: u64) -> Self {
        self.sweep_interval_secs = sweep_secs;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(
            interval_secs = self.sweep_interval_secs,
            "Starting cache maintenance job"
        );

        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(Duration::from_secs(self.sweep_interval_secs));
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("CacheMaintenanceJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        match self.maintenance.sweep_expired().await {
                            Ok(outcome) if outcome.entries_removed > 0 => {
                                info!(
                                    entries_removed = outcome.entries_removed,
                                    cache_size = outcome.cache_size,
                                    "Cache sweep completed"
                                );
                            }
                            Ok(outcome) => debug!(cache_size = outcome.cache_size, "Cache sweep found nothing expired"),
                            Err(e) => error!(error = %e, "Cache sweep failed"),
                        }
                    }
                }
            }
        });
    }
}
