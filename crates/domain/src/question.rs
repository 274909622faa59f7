use crate::dns_record::RecordType;
use std::fmt;
use std::sync::Arc;

/// Lowercases a domain name and strips the trailing root dot.
pub fn normalize_name(name: &str) -> String {
    name.trim_end_matches('.').to_ascii_lowercase()
}

/// The single honoured question of an inbound query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub name: Arc<str>,
    pub record_type: RecordType,
    pub class: u16,
}

impl Question {
    pub const CLASS_IN: u16 = 1;

    pub fn new(name: &str, record_type: RecordType) -> Self {
        Self::with_class(name, record_type, Self::CLASS_IN)
    }

    pub fn with_class(name: &str, record_type: RecordType, class: u16) -> Self {
        Self {
            name: Arc::from(normalize_name(name)),
            record_type,
            class,
        }
    }

    /// Cache store key for this question, `"<name>:<TYPE>"`.
    pub fn cache_key(&self) -> String {
        format!("{}:{}", self.name, self.record_type)
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.record_type)
    }
}
