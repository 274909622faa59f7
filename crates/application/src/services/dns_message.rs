//! Decoding of inbound client queries and upstream responses.

use super::record_type_map::RecordTypeMapper;
use hickory_proto::op::{Message, MessageType, Query};
use hickory_proto::rr::{RData, Record};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder, NameEncoding};
use std::net::IpAddr;
use tierdns_domain::{normalize_name, DomainError, Question, RecordData, ResourceAnswer};

/// A decoded client query: header bits needed for the reply, the first
/// question in our own types and the same question as it arrived.
#[derive(Debug, Clone)]
pub struct InboundQuery {
    pub id: u16,
    pub recursion_desired: bool,
    pub question: Question,
    pub query: Query,
}

#[derive(Debug, Clone)]
pub struct DecodedResponse {
    pub id: u16,
    pub answers: Vec<ResourceAnswer>,
}

pub struct DnsMessageCodec;

impl DnsMessageCodec {
    pub fn decode_query(raw: &[u8]) -> Result<InboundQuery, DomainError> {
        let message = Message::from_vec(raw)
            .map_err(|e| DomainError::InvalidQuery(format!("Failed to parse DNS query: {}", e)))?;

        if message.message_type() != MessageType::Query {
            return Err(DomainError::InvalidQuery(
                "Message is not a query".to_string(),
            ));
        }

        let query = message
            .queries()
            .first()
            .cloned()
            .ok_or_else(|| DomainError::InvalidQuery("Query has no question".to_string()))?;

        let question = Question::with_class(
            &query.name().to_utf8(),
            RecordTypeMapper::from_hickory(query.query_type()),
            u16::from(query.query_class()),
        );

        Ok(InboundQuery {
            id: message.id(),
            recursion_desired: message.recursion_desired(),
            question,
            query,
        })
    }

    pub fn decode_response(raw: &[u8]) -> Result<DecodedResponse, DomainError> {
        let message = Message::from_vec(raw).map_err(|e| {
            DomainError::InvalidQuery(format!("Failed to parse DNS response: {}", e))
        })?;

        let answers = message
            .answers()
            .iter()
            .map(Self::to_resource_answer)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DecodedResponse {
            id: message.id(),
            answers,
        })
    }

    /// Identifier from the first two header bytes, without a full decode.
    pub fn extract_query_id(raw: &[u8]) -> Option<u16> {
        match raw {
            [high, low, ..] => Some(u16::from_be_bytes([*high, *low])),
            _ => None,
        }
    }

    pub(crate) fn serialize_message(message: &Message) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);

        message.emit(&mut encoder).map_err(|e| {
            DomainError::Encoding(format!("Failed to serialize DNS message: {}", e))
        })?;

        Ok(buf)
    }

    fn to_resource_answer(record: &Record) -> Result<ResourceAnswer, DomainError> {
        let data = match record.data() {
            RData::A(a) => RecordData::Address(IpAddr::V4(a.0)),
            RData::AAAA(aaaa) => RecordData::Address(IpAddr::V6(aaaa.0)),
            RData::CNAME(canonical) => RecordData::Name(normalize_name(&canonical.to_utf8())),
            RData::PTR(target) => RecordData::Name(normalize_name(&target.to_utf8())),
            RData::NS(target) => RecordData::Name(normalize_name(&target.to_utf8())),
            RData::MX(mx) => RecordData::Mail {
                preference: Some(mx.preference()),
                exchange: normalize_name(&mx.exchange().to_utf8()),
            },
            RData::TXT(txt) => Self::text_or_opaque(record, txt.txt_data())?,
            other => RecordData::Opaque(Self::rdata_bytes(other)?),
        };

        Ok(ResourceAnswer::new(
            &record.name().to_utf8(),
            RecordTypeMapper::from_hickory(record.record_type()),
            i64::from(record.ttl()),
            data,
        ))
    }

    /// TXT strings are kept as text when they are valid UTF-8, otherwise the
    /// raw RDATA is kept so nothing is lost.
    fn text_or_opaque(record: &Record, strings: &[Box<[u8]>]) -> Result<RecordData, DomainError> {
        let decoded: Option<Vec<String>> = strings
            .iter()
            .map(|s| std::str::from_utf8(s).ok().map(str::to_string))
            .collect();

        match decoded {
            Some(text) => Ok(RecordData::Text(text)),
            None => Ok(RecordData::Opaque(Self::rdata_bytes(record.data())?)),
        }
    }

    /// Names inside the RDATA are written in full. A compression pointer
    /// would point into this scratch buffer, not into the message the
    /// bytes are later replayed in.
    fn rdata_bytes(rdata: &RData) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(64);
        let mut encoder = BinEncoder::new(&mut buf);
        encoder.set_name_encoding(NameEncoding::Uncompressed);

        rdata
            .emit(&mut encoder)
            .map_err(|e| DomainError::Serialization(format!("Failed to read RDATA: {}", e)))?;

        Ok(buf)
    }
}
