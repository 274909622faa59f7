use super::Repositories;
use std::sync::Arc;
use tierdns_application::ports::CacheMaintenancePort;
use tierdns_application::services::{
    BlocklistFilter, PendingRequestTable, RecordLookup, ResponseCache, ResponseEncoder,
};
use tierdns_application::use_cases::{
    HandleDnsQueryUseCase, HandleUpstreamResponseUseCase, UpstreamForwarder,
};
use tierdns_domain::Config;
use tierdns_infrastructure::cache::MemoryCacheStore;
use tierdns_infrastructure::dns::DnsSockets;
use tracing::info;

pub struct DnsServices {
    pub blocklist: Arc<BlocklistFilter>,
    pub cache_maintenance: Arc<dyn CacheMaintenancePort>,
    pub query_handler: Arc<HandleDnsQueryUseCase>,
    pub response_handler: Arc<HandleUpstreamResponseUseCase>,
}

impl DnsServices {
    pub async fn new(
        config: &Config,
        repos: &Repositories,
        sockets: &DnsSockets,
    ) -> anyhow::Result<Self> {
        let blocklist = Arc::new(BlocklistFilter::new(repos.blocklist.clone()));
        let blocked = blocklist.load().await?;
        info!(domains = blocked, "Blocklist loaded");

        let cache_store = Arc::new(MemoryCacheStore::new());
        let cache = Arc::new(ResponseCache::new(
            cache_store.clone(),
            config.cache.max_cname_depth,
        ));
        let records = Arc::new(RecordLookup::new(repos.records.clone()));
        let encoder = Arc::new(ResponseEncoder::new(config.cache.default_answer_ttl));

        let client_sender = Arc::new(sockets.client_sender());
        let upstream_sender = Arc::new(sockets.upstream_sender());
        let pending = Arc::new(PendingRequestTable::new());

        let upstreams = config.upstream.socket_addrs()?;
        info!(
            upstreams = ?upstreams,
            timeout_ms = config.upstream.timeout_ms,
            on_exhaustion = config.upstream.on_exhaustion.as_str(),
            "Upstream forwarding configured"
        );
        let forwarder = Arc::new(
            UpstreamForwarder::new(
                upstreams,
                config.upstream.timeout(),
                pending.clone(),
                upstream_sender,
                client_sender.clone(),
            )
            .with_exhaustion_policy(config.upstream.on_exhaustion),
        );

        let query_handler = Arc::new(
            HandleDnsQueryUseCase::new(
                blocklist.clone(),
                cache.clone(),
                records,
                encoder,
                forwarder,
                client_sender.clone(),
            )
            .with_sinkhole_ttl(config.cache.sinkhole_ttl),
        );
        let response_handler = Arc::new(HandleUpstreamResponseUseCase::new(
            cache,
            pending,
            client_sender,
        ));

        Ok(Self {
            blocklist,
            cache_maintenance: cache_store,
            query_handler,
            response_handler,
        })
    }
}
