use crate::ports::RecordRepository;
use std::sync::Arc;
use tierdns_domain::{parse_reverse_name, DomainError, RRset, RecordData, RecordType};
use tracing::debug;

/// Authoritative answers from the operator's record store.
pub struct RecordLookup {
    repository: Arc<dyn RecordRepository>,
}

impl RecordLookup {
    pub fn new(repository: Arc<dyn RecordRepository>) -> Self {
        Self { repository }
    }

    pub async fn find(
        &self,
        name: &str,
        record_type: RecordType,
    ) -> Result<Option<RRset>, DomainError> {
        if record_type == RecordType::PTR {
            return self.find_ptr(name).await;
        }
        self.repository
            .find_by_name_and_type(name, record_type)
            .await
    }

    async fn find_ptr(&self, name: &str) -> Result<Option<RRset>, DomainError> {
        let Some(address) = parse_reverse_name(name) else {
            debug!(domain = %name, "Not a valid reverse lookup name");
            return Ok(None);
        };

        let owner = self.repository.find_name_by_address(address).await?;
        Ok(owner.map(|owner| RRset::new(RecordType::PTR, None, vec![RecordData::Name(owner)])))
    }
}
