use super::forward_query::UpstreamForwarder;
use crate::ports::DatagramSender;
use crate::services::{
    BlocklistFilter, DnsMessageCodec, InboundQuery, RecordLookup, ResponseCache, ResponseEncoder,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tierdns_domain::config::DEFAULT_ANSWER_TTL;
use tierdns_domain::{DomainError, RRset};
use tracing::{debug, error, info, warn};

/// Which tier answered a client query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOutcome {
    Blocked,
    Cached,
    Authoritative,
    /// Handed to the upstream forwarder; the reply comes later.
    Forwarded,
    /// Undecodable or failed before an answer source was chosen.
    Dropped,
}

/// The resolution pipeline: blocklist, cache, local records, upstream.
/// The first tier with an answer wins.
pub struct HandleDnsQueryUseCase {
    blocklist: Arc<BlocklistFilter>,
    cache: Arc<ResponseCache>,
    records: Arc<RecordLookup>,
    encoder: Arc<ResponseEncoder>,
    forwarder: Arc<UpstreamForwarder>,
    client_sender: Arc<dyn DatagramSender>,
    sinkhole_ttl: u32,
}

impl HandleDnsQueryUseCase {
    pub fn new(
        blocklist: Arc<BlocklistFilter>,
        cache: Arc<ResponseCache>,
        records: Arc<RecordLookup>,
        encoder: Arc<ResponseEncoder>,
        forwarder: Arc<UpstreamForwarder>,
        client_sender: Arc<dyn DatagramSender>,
    ) -> Self {
        Self {
            blocklist,
            cache,
            records,
            encoder,
            forwarder,
            client_sender,
            sinkhole_ttl: DEFAULT_ANSWER_TTL,
        }
    }

    pub fn with_sinkhole_ttl(mut self, ttl: u32) -> Self {
        self.sinkhole_ttl = ttl;
        self
    }

    pub async fn execute(&self, raw: &[u8], client: SocketAddr) -> QueryOutcome {
        let query = match DnsMessageCodec::decode_query(raw) {
            Ok(query) => query,
            Err(e) => {
                warn!(client = %client, error = %e, "Dropping undecodable query");
                return QueryOutcome::Dropped;
            }
        };

        info!(
            client = %client,
            domain = %query.question.name,
            record_type = %query.question.record_type,
            query_id = query.id,
            "DNS query received"
        );

        let local = match self.answer_locally(&query).await {
            Ok(local) => local,
            Err(e) => {
                warn!(
                    client = %client,
                    domain = %query.question.name,
                    error = %e,
                    "Query handling failed, dropping"
                );
                return QueryOutcome::Dropped;
            }
        };

        let Some((rrset, outcome)) = local else {
            if let Err(e) = self.forwarder.forward(raw, client).await {
                warn!(client = %client, query_id = query.id, error = %e, "Failed to forward query");
                return QueryOutcome::Dropped;
            }
            return QueryOutcome::Forwarded;
        };

        let blocked = outcome == QueryOutcome::Blocked;
        match self.encoder.encode_or_servfail(&query, &rrset, blocked) {
            Ok(bytes) => {
                if let Err(e) = self.client_sender.send_to(&bytes, client).await {
                    error!(client = %client, query_id = query.id, error = %e, "Failed to send response");
                }
                outcome
            }
            Err(e) => {
                error!(client = %client, query_id = query.id, error = %e, "Failed to build any response");
                QueryOutcome::Dropped
            }
        }
    }

    async fn answer_locally(
        &self,
        query: &InboundQuery,
    ) -> Result<Option<(RRset, QueryOutcome)>, DomainError> {
        let name = &query.question.name;
        let record_type = query.question.record_type;

        if self.blocklist.is_blocked(name) {
            info!(domain = %name, record_type = %record_type, "Domain blocked");
            return Ok(Some((RRset::sinkhole(self.sinkhole_ttl), QueryOutcome::Blocked)));
        }

        if let Some(rrset) = self.cache.resolve(name, record_type).await? {
            debug!(domain = %name, record_type = %record_type, "Cache hit");
            return Ok(Some((rrset, QueryOutcome::Cached)));
        }

        if let Some(rrset) = self.records.find(name, record_type).await? {
            debug!(domain = %name, record_type = %record_type, "Authoritative record found");
            return Ok(Some((rrset, QueryOutcome::Authoritative)));
        }

        Ok(None)
    }
}
