use async_trait::async_trait;
use tierdns_domain::DomainError;

/// Key/value store with native per-key expiry.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    async fn set_with_expiry(
        &self,
        key: &str,
        value: String,
        ttl_secs: u64,
    ) -> Result<(), DomainError>;
}
