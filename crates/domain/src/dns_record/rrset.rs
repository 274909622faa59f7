use super::{RecordData, RecordType};
use std::net::{IpAddr, Ipv4Addr};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RRset {
    pub record_type: RecordType,
    /// `None` when the source carried no TTL; the encoder substitutes its default.
    pub ttl: Option<u32>,
    pub content: Vec<RecordData>,
}

impl RRset {
    pub fn new(record_type: RecordType, ttl: Option<u32>, content: Vec<RecordData>) -> Self {
        Self {
            record_type,
            ttl,
            content,
        }
    }

    /// The answer given for blocked names: a single A record pointing at 0.0.0.0.
    pub fn sinkhole(ttl: u32) -> Self {
        Self {
            record_type: RecordType::A,
            ttl: Some(ttl),
            content: vec![RecordData::Address(IpAddr::V4(Ipv4Addr::UNSPECIFIED))],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
