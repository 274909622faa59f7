use crate::ports::DatagramSender;
use crate::services::{Advance, DnsMessageCodec, PendingRequestTable, ResponseEncoder};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tierdns_domain::{DomainError, ExhaustionPolicy};
use tracing::{debug, error, warn};

/// Sends unresolved queries upstream and fails over in configured order.
///
/// Each forwarded query gets one failover task. It sleeps for the timeout,
/// moves the pending entry to the next upstream and resends, until an
/// answer retires the entry (which aborts the task) or the list runs out.
pub struct UpstreamForwarder {
    upstreams: Vec<SocketAddr>,
    timeout: Duration,
    on_exhaustion: ExhaustionPolicy,
    pending: Arc<PendingRequestTable>,
    upstream_sender: Arc<dyn DatagramSender>,
    client_sender: Arc<dyn DatagramSender>,
}

impl UpstreamForwarder {
    pub fn new(
        upstreams: Vec<SocketAddr>,
        timeout: Duration,
        pending: Arc<PendingRequestTable>,
        upstream_sender: Arc<dyn DatagramSender>,
        client_sender: Arc<dyn DatagramSender>,
    ) -> Self {
        Self {
            upstreams,
            timeout,
            on_exhaustion: ExhaustionPolicy::default(),
            pending,
            upstream_sender,
            client_sender,
        }
    }

    pub fn with_exhaustion_policy(mut self, policy: ExhaustionPolicy) -> Self {
        self.on_exhaustion = policy;
        self
    }

    pub fn upstreams(&self) -> &[SocketAddr] {
        &self.upstreams
    }

    pub async fn forward(self: &Arc<Self>, raw: &[u8], client: SocketAddr) -> Result<(), DomainError> {
        let query_id = DnsMessageCodec::extract_query_id(raw)
            .ok_or_else(|| DomainError::InvalidQuery("Query shorter than header".to_string()))?;

        let Some(first) = self.upstreams.first().copied() else {
            return Err(DomainError::UpstreamExhausted(query_id));
        };

        let generation = self.pending.register(query_id, client);
        let raw: Arc<[u8]> = Arc::from(raw);

        debug!(query_id, client = %client, upstream = %first, attempt = 1, "Forwarding query upstream");
        self.send_upstream(&raw, first, query_id).await;

        let forwarder = Arc::clone(self);
        let task = tokio::spawn(async move {
            forwarder.run_failover(raw, query_id, generation).await;
        });
        self.pending
            .attach_timer(query_id, generation, task.abort_handle());

        Ok(())
    }

    async fn run_failover(&self, raw: Arc<[u8]>, query_id: u16, generation: u64) {
        loop {
            tokio::time::sleep(self.timeout).await;

            match self
                .pending
                .advance(query_id, generation, self.upstreams.len())
            {
                Advance::Stale => return,
                Advance::Next(index) => {
                    let Some(upstream) = self.upstreams.get(index).copied() else {
                        return;
                    };
                    warn!(
                        query_id,
                        upstream = %upstream,
                        attempt = index + 1,
                        "Upstream timed out, trying next server"
                    );
                    self.send_upstream(&raw, upstream, query_id).await;
                }
                Advance::Exhausted => {
                    self.exhaust(&raw, query_id, generation).await;
                    return;
                }
            }
        }
    }

    async fn exhaust(&self, raw: &[u8], query_id: u16, generation: u64) {
        let Some(pending) = self.pending.expire(query_id, generation) else {
            return;
        };

        warn!(
            query_id,
            client = %pending.client,
            attempts = pending.attempts,
            policy = self.on_exhaustion.as_str(),
            "All upstream servers exhausted"
        );

        if self.on_exhaustion == ExhaustionPolicy::Silent {
            return;
        }

        let response = DnsMessageCodec::decode_query(raw)
            .and_then(|query| ResponseEncoder::encode_servfail(&query));
        match response {
            Ok(bytes) => {
                if let Err(e) = self.client_sender.send_to(&bytes, pending.client).await {
                    error!(query_id, client = %pending.client, error = %e, "Failed to send SERVFAIL");
                }
            }
            Err(e) => error!(query_id, error = %e, "Failed to build SERVFAIL"),
        }
    }

    async fn send_upstream(&self, raw: &[u8], upstream: SocketAddr, query_id: u16) {
        if let Err(e) = self.upstream_sender.send_to(raw, upstream).await {
            warn!(query_id, upstream = %upstream, error = %e, "Failed to send query upstream");
        }
    }
}
