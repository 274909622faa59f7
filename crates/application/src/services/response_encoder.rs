use super::dns_message::{DnsMessageCodec, InboundQuery};
use super::record_type_map::RecordTypeMapper;
use hickory_proto::op::{Message, MessageType, OpCode, ResponseCode};
use hickory_proto::rr::rdata::{A, AAAA, CNAME, MX, NS, NULL, PTR, TXT};
use hickory_proto::rr::{Name, RData, Record};
use std::net::IpAddr;
use std::str::FromStr;
use tierdns_domain::{DomainError, RRset, RecordData, RecordType};
use tracing::error;

/// Longest character-string a TXT record can carry on the wire.
const TXT_CHUNK_LEN: usize = 255;

/// Builds wire-format answers for the resolution pipeline.
pub struct ResponseEncoder {
    default_ttl: u32,
}

impl ResponseEncoder {
    pub fn new(default_ttl: u32) -> Self {
        Self { default_ttl }
    }

    /// Encodes an authoritative answer for `query`. Blocked answers are
    /// always A records, whatever type was asked for.
    pub fn encode(
        &self,
        query: &InboundQuery,
        rrset: &RRset,
        blocked: bool,
    ) -> Result<Vec<u8>, DomainError> {
        let record_type = if blocked {
            RecordType::A
        } else {
            rrset.record_type
        };
        let ttl = rrset.ttl.unwrap_or(self.default_ttl);
        let owner = query.query.name().clone();

        let mut message = Self::response_header(query);
        for record in Self::build_records(&owner, record_type, ttl, &rrset.content)? {
            message.add_answer(record);
        }

        DnsMessageCodec::serialize_message(&message)
    }

    /// Like [`encode`](Self::encode), but falls back to SERVFAIL when the
    /// answer cannot be built.
    pub fn encode_or_servfail(
        &self,
        query: &InboundQuery,
        rrset: &RRset,
        blocked: bool,
    ) -> Result<Vec<u8>, DomainError> {
        match self.encode(query, rrset, blocked) {
            Ok(bytes) => Ok(bytes),
            Err(e) => {
                error!(
                    domain = %query.question.name,
                    record_type = %query.question.record_type,
                    rrset = ?rrset,
                    error = %e,
                    "Failed to encode answer, sending SERVFAIL"
                );
                Self::encode_servfail(query)
            }
        }
    }

    /// SERVFAIL with no answers, echoing the query's id and question.
    pub fn encode_servfail(query: &InboundQuery) -> Result<Vec<u8>, DomainError> {
        let mut message = Self::response_header(query);
        message.set_response_code(ResponseCode::ServFail);
        DnsMessageCodec::serialize_message(&message)
    }

    fn response_header(query: &InboundQuery) -> Message {
        let mut message = Message::new(query.id, MessageType::Response, OpCode::Query);
        message.set_authoritative(true);
        message.set_recursion_desired(query.recursion_desired);
        message.set_recursion_available(true);
        message.add_query(query.query.clone());
        message
    }

    fn build_records(
        owner: &Name,
        record_type: RecordType,
        ttl: u32,
        content: &[RecordData],
    ) -> Result<Vec<Record>, DomainError> {
        let mut records = Vec::with_capacity(content.len());

        for item in content {
            match (record_type, item) {
                (RecordType::TXT, RecordData::Text(strings)) => {
                    for chunk in strings.iter().flat_map(|s| Self::txt_chunks(s)) {
                        let rdata = RData::TXT(TXT::from_bytes(vec![chunk]));
                        records.push(Record::from_rdata(owner.clone(), ttl, rdata));
                    }
                }
                _ => {
                    let rdata = Self::to_rdata(record_type, item)?;
                    records.push(Record::from_rdata(owner.clone(), ttl, rdata));
                }
            }
        }

        Ok(records)
    }

    /// Splits on byte boundaries; an empty string still yields one chunk.
    fn txt_chunks(value: &str) -> Vec<&[u8]> {
        let bytes = value.as_bytes();
        if bytes.is_empty() {
            return vec![bytes];
        }
        bytes.chunks(TXT_CHUNK_LEN).collect()
    }

    fn to_rdata(record_type: RecordType, item: &RecordData) -> Result<RData, DomainError> {
        let rdata = match (record_type, item) {
            (RecordType::A, RecordData::Address(IpAddr::V4(ip))) => RData::A(A(*ip)),
            (RecordType::AAAA, RecordData::Address(IpAddr::V6(ip))) => RData::AAAA(AAAA(*ip)),
            (
                RecordType::MX,
                RecordData::Mail {
                    preference,
                    exchange,
                },
            ) => RData::MX(MX::new(preference.unwrap_or(10), Self::parse_name(exchange)?)),
            (RecordType::CNAME, RecordData::Name(target)) => {
                RData::CNAME(CNAME(Self::parse_name(target)?))
            }
            (RecordType::PTR, RecordData::Name(target)) => {
                RData::PTR(PTR(Self::parse_name(target)?))
            }
            (RecordType::NS, RecordData::Name(target)) => RData::NS(NS(Self::parse_name(target)?)),
            (rt, RecordData::Opaque(bytes)) => RData::Unknown {
                code: RecordTypeMapper::to_hickory(rt),
                rdata: NULL::with(bytes.clone()),
            },
            (rt, other) => {
                return Err(DomainError::Encoding(format!(
                    "{:?} content does not fit a {} record",
                    other, rt
                )))
            }
        };
        Ok(rdata)
    }

    fn parse_name(name: &str) -> Result<Name, DomainError> {
        let fqdn = if name.ends_with('.') {
            name.to_string()
        } else {
            format!("{}.", name)
        };
        Name::from_str(&fqdn).map_err(|e| {
            DomainError::InvalidDomainName(format!("Invalid domain '{}': {}", name, e))
        })
    }
}
