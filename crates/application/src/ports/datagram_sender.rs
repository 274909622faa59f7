use async_trait::async_trait;
use std::net::SocketAddr;
use tierdns_domain::DomainError;

#[async_trait]
pub trait DatagramSender: Send + Sync {
    async fn send_to(&self, payload: &[u8], target: SocketAddr) -> Result<(), DomainError>;
}
