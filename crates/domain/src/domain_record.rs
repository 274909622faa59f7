use crate::dns_record::{RRset, RecordData, RecordType};

/// An operator-configured record read from the `records` collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainRecord {
    pub id: Option<i64>,
    pub name: String,
    pub record_type: RecordType,
    pub content: Vec<RecordData>,
    pub ttl: Option<u32>,
}

impl DomainRecord {
    pub fn new(
        name: &str,
        record_type: RecordType,
        content: Vec<RecordData>,
        ttl: Option<u32>,
    ) -> Self {
        Self {
            id: None,
            name: crate::question::normalize_name(name),
            record_type,
            content,
            ttl,
        }
    }

    pub fn into_rrset(self) -> RRset {
        RRset::new(self.record_type, self.ttl, self.content)
    }
}
