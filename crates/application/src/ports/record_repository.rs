use async_trait::async_trait;
use std::net::Ipv4Addr;
use tierdns_domain::{DomainError, RRset, RecordType};

/// Read-only access to operator-configured records.
#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// Exact `(name, type)` match; at most one record is returned.
    async fn find_by_name_and_type(
        &self,
        name: &str,
        record_type: RecordType,
    ) -> Result<Option<RRset>, DomainError>;

    /// Owner name of the A record whose content equals `address`.
    async fn find_name_by_address(&self, address: Ipv4Addr)
        -> Result<Option<String>, DomainError>;
}
