use crate::ports::DatagramSender;
use crate::services::{DnsMessageCodec, PendingRequestTable, ResponseCache};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, error, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorrelationOutcome {
    /// Forwarded to the waiting client.
    Delivered,
    /// No pending request for the id: late, duplicate or unsolicited.
    Unsolicited,
    /// Could not be decoded; the pending request keeps waiting.
    Malformed,
}

/// Matches upstream answers back to the clients waiting for them.
pub struct HandleUpstreamResponseUseCase {
    cache: Arc<ResponseCache>,
    pending: Arc<PendingRequestTable>,
    client_sender: Arc<dyn DatagramSender>,
}

impl HandleUpstreamResponseUseCase {
    pub fn new(
        cache: Arc<ResponseCache>,
        pending: Arc<PendingRequestTable>,
        client_sender: Arc<dyn DatagramSender>,
    ) -> Self {
        Self {
            cache,
            pending,
            client_sender,
        }
    }

    pub async fn execute(&self, raw: &[u8], upstream: SocketAddr) -> CorrelationOutcome {
        let decoded = match DnsMessageCodec::decode_response(raw) {
            Ok(decoded) => decoded,
            Err(e) => {
                warn!(upstream = %upstream, error = %e, "Dropping undecodable upstream response");
                return CorrelationOutcome::Malformed;
            }
        };

        let cached = self.cache.store(&decoded.answers).await;
        debug!(
            query_id = decoded.id,
            upstream = %upstream,
            answers = decoded.answers.len(),
            cached,
            "Upstream response received"
        );

        let Some(pending) = self.pending.retire(decoded.id) else {
            debug!(query_id = decoded.id, upstream = %upstream, "No pending request, discarding response");
            return CorrelationOutcome::Unsolicited;
        };

        if let Err(e) = self.client_sender.send_to(raw, pending.client).await {
            error!(
                query_id = decoded.id,
                client = %pending.client,
                error = %e,
                "Failed to deliver upstream response"
            );
        }

        CorrelationOutcome::Delivered
    }
}
