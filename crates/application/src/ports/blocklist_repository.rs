use async_trait::async_trait;
use tierdns_domain::{BlockedDomain, DomainError};

#[async_trait]
pub trait BlocklistRepository: Send + Sync {
    /// Full scan of the blocklist collection.
    async fn get_all(&self) -> Result<Vec<BlockedDomain>, DomainError>;
}
