use async_trait::async_trait;
use std::net::SocketAddr;
use std::sync::Arc;
use tierdns_application::ports::DatagramSender;
use tierdns_domain::DomainError;
use tokio::net::UdpSocket;

/// Sends datagrams out of a shared socket.
#[derive(Clone)]
pub struct UdpDatagramSender {
    socket: Arc<UdpSocket>,
}

impl UdpDatagramSender {
    pub fn new(socket: Arc<UdpSocket>) -> Self {
        Self { socket }
    }
}

#[async_trait]
impl DatagramSender for UdpDatagramSender {
    async fn send_to(&self, payload: &[u8], target: SocketAddr) -> Result<(), DomainError> {
        self.socket.send_to(payload, target).await?;
        Ok(())
    }
}
