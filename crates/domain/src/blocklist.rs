use crate::question::normalize_name;

/// One entry of the `blocklist` collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockedDomain {
    pub id: Option<i64>,
    pub name: String,
}

impl BlockedDomain {
    pub fn new(name: &str) -> Self {
        Self {
            id: None,
            name: normalize_name(name),
        }
    }

    pub fn with_id(id: i64, name: &str) -> Self {
        Self {
            id: Some(id),
            name: normalize_name(name),
        }
    }
}
