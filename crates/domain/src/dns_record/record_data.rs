use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// Payload of one resource record, shaped by its type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordData {
    /// A / AAAA
    Address(IpAddr),
    Mail {
        preference: Option<u16>,
        exchange: String,
    },
    /// One logical TXT value made of one or more strings.
    Text(Vec<String>),
    /// CNAME, PTR and NS targets.
    Name(String),
    /// Raw RDATA of any other type, kept byte for byte.
    Opaque(Vec<u8>),
}

impl RecordData {
    pub fn text(value: impl Into<String>) -> Self {
        RecordData::Text(vec![value.into()])
    }

    pub fn as_name(&self) -> Option<&str> {
        match self {
            RecordData::Name(name) => Some(name.as_str()),
            _ => None,
        }
    }
}
