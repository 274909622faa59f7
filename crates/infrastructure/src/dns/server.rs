use super::socket::create_udp_socket;
use super::udp_sender::UdpDatagramSender;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tierdns_application::use_cases::{HandleDnsQueryUseCase, HandleUpstreamResponseUseCase};
use tokio::net::UdpSocket;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

const MAX_DATAGRAM_BYTES: usize = 4096;

/// The two UDP endpoints of the resolver: the listener clients query, and
/// the socket used to talk to upstream resolvers.
pub struct DnsSockets {
    client: Arc<UdpSocket>,
    upstream: Arc<UdpSocket>,
}

impl DnsSockets {
    pub fn bind(listen_addr: SocketAddr, upstream_bind_addr: SocketAddr) -> io::Result<Self> {
        let client = create_udp_socket(listen_addr)?;
        let upstream = create_udp_socket(upstream_bind_addr)?;
        Ok(Self {
            client: Arc::new(client),
            upstream: Arc::new(upstream),
        })
    }

    pub fn client_sender(&self) -> UdpDatagramSender {
        UdpDatagramSender::new(Arc::clone(&self.client))
    }

    pub fn upstream_sender(&self) -> UdpDatagramSender {
        UdpDatagramSender::new(Arc::clone(&self.upstream))
    }

    pub fn listen_addr(&self) -> io::Result<SocketAddr> {
        self.client.local_addr()
    }

    pub fn upstream_addr(&self) -> io::Result<SocketAddr> {
        self.upstream.local_addr()
    }
}

/// Runs both receive loops. Every datagram is handled in its own task so
/// a slow lookup never holds up the socket.
pub struct UdpDnsServer {
    sockets: DnsSockets,
    queries: Arc<HandleDnsQueryUseCase>,
    responses: Arc<HandleUpstreamResponseUseCase>,
}

impl UdpDnsServer {
    pub fn new(
        sockets: DnsSockets,
        queries: Arc<HandleDnsQueryUseCase>,
        responses: Arc<HandleUpstreamResponseUseCase>,
    ) -> Self {
        Self {
            sockets,
            queries,
            responses,
        }
    }

    /// Returns once `shutdown` is cancelled.
    pub async fn run(self, shutdown: CancellationToken) {
        if let Ok(addr) = self.sockets.listen_addr() {
            info!(bind_address = %addr, "DNS listener ready");
        }

        let mut join_set: JoinSet<()> = JoinSet::new();

        let queries = self.queries;
        join_set.spawn(receive_loop(
            Arc::clone(&self.sockets.client),
            shutdown.clone(),
            "client",
            move |datagram, from| {
                let queries = Arc::clone(&queries);
                async move {
                    queries.execute(&datagram, from).await;
                }
            },
        ));

        let responses = self.responses;
        join_set.spawn(receive_loop(
            Arc::clone(&self.sockets.upstream),
            shutdown.clone(),
            "upstream",
            move |datagram, from| {
                let responses = Arc::clone(&responses);
                async move {
                    responses.execute(&datagram, from).await;
                }
            },
        ));

        while join_set.join_next().await.is_some() {}
        info!("DNS listener stopped");
    }
}

async fn receive_loop<F, Fut>(
    socket: Arc<UdpSocket>,
    shutdown: CancellationToken,
    side: &'static str,
    handle: F,
) where
    F: Fn(Arc<[u8]>, SocketAddr) -> Fut + Send + 'static,
    Fut: std::future::Future<Output = ()> + Send + 'static,
{
    let mut recv_buf = vec![0u8; MAX_DATAGRAM_BYTES];

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                debug!(side, "Receive loop shutting down");
                break;
            }
            received = socket.recv_from(&mut recv_buf) => match received {
                Ok((n, from)) => {
                    let datagram: Arc<[u8]> = Arc::from(&recv_buf[..n]);
                    tokio::spawn(handle(datagram, from));
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    warn!(side, error = %e, "UDP recv error");
                }
            }
        }
    }
}
