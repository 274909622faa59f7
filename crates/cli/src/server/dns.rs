use crate::di::DnsServices;
use tierdns_domain::ServerConfig;
use tierdns_infrastructure::dns::{DnsSockets, UdpDnsServer};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Binds the client listener and the upstream socket. Called before any
/// service is built so a port conflict fails startup early.
pub fn bind_sockets(cfg: &ServerConfig) -> anyhow::Result<DnsSockets> {
    let listen_addr = cfg.listen_socket_addr()?;
    let upstream_addr = cfg.upstream_socket_addr()?;

    let sockets = DnsSockets::bind(listen_addr, upstream_addr).map_err(|e| {
        error!(bind_address = %listen_addr, error = %e, "Failed to bind DNS sockets");
        anyhow::anyhow!("failed to bind {}: {}", listen_addr, e)
    })?;

    if let Ok(addr) = sockets.upstream_addr() {
        info!(upstream_socket = %addr, "Upstream socket bound");
    }

    Ok(sockets)
}

pub async fn run_dns_server(sockets: DnsSockets, services: &DnsServices, shutdown: CancellationToken) {
    let server = UdpDnsServer::new(
        sockets,
        services.query_handler.clone(),
        services.response_handler.clone(),
    );
    server.run(shutdown).await;
}
