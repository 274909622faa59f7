use super::{RecordData, RecordType};

/// One answer record decoded from an upstream response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceAnswer {
    pub name: String,
    pub record_type: RecordType,
    pub ttl: i64,
    pub data: RecordData,
}

impl ResourceAnswer {
    pub fn new(name: &str, record_type: RecordType, ttl: i64, data: RecordData) -> Self {
        Self {
            name: crate::question::normalize_name(name),
            record_type,
            ttl,
            data,
        }
    }

    /// Cache store key shared by every answer of the same owner and type.
    pub fn cache_key(&self) -> String {
        format!("{}:{}", self.name, self.record_type)
    }
}
