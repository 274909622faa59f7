use serde_json::Value;
use std::net::IpAddr;
use tierdns_domain::{DomainError, DomainRecord, RecordData, RecordType};

pub(crate) type RecordRow = (i64, String, String, String, Option<i64>);

pub(crate) const RECORD_SELECT_BY_NAME_AND_TYPE: &str =
    "SELECT id, name, record_type, content, ttl
     FROM records
     WHERE name = ? AND record_type = ?
     ORDER BY id
     LIMIT 1";

// `content` is either the quoted address itself or a JSON array holding it.
// json_each only runs on rows whose content is valid JSON.
pub(crate) const RECORD_SELECT_NAME_BY_ADDRESS: &str = "SELECT name
     FROM records
     WHERE record_type = 'A'
       AND (content = json_quote(?1)
            OR CASE WHEN json_valid(content)
                    THEN EXISTS (SELECT 1 FROM json_each(records.content) WHERE json_each.value = ?1)
                    ELSE 0
               END)
     ORDER BY id
     LIMIT 1";

pub(crate) fn row_to_record(row: RecordRow) -> Result<DomainRecord, DomainError> {
    let (id, name, record_type, content, ttl) = row;

    let record_type: RecordType = record_type
        .parse()
        .map_err(|e: String| DomainError::InvalidRecord(e))?;
    let value: Value = serde_json::from_str(&content)
        .map_err(|e| DomainError::InvalidRecord(format!("content of {} is not JSON: {}", name, e)))?;
    let content = decode_content(record_type, &value)?;
    let ttl = match ttl {
        Some(ttl) => Some(
            u32::try_from(ttl)
                .map_err(|_| DomainError::InvalidRecord(format!("ttl {} out of range", ttl)))?,
        ),
        None => None,
    };

    let mut record = DomainRecord::new(&name, record_type, content, ttl);
    record.id = Some(id);
    Ok(record)
}

/// A top-level array holds one value per answer, except for opaque types
/// where an array of numbers is a single value.
pub(crate) fn decode_content(
    record_type: RecordType,
    value: &Value,
) -> Result<Vec<RecordData>, DomainError> {
    let items = match value {
        Value::Array(items) if !(is_opaque(record_type) && is_byte_array(items)) => items.iter().collect(),
        single => vec![single],
    };

    if items.is_empty() {
        return Err(DomainError::InvalidRecord("record has no content".to_string()));
    }

    items
        .into_iter()
        .map(|item| decode_item(record_type, item))
        .collect()
}

fn decode_item(record_type: RecordType, value: &Value) -> Result<RecordData, DomainError> {
    let invalid =
        || DomainError::InvalidRecord(format!("unexpected {} content: {}", record_type, value));

    match record_type {
        RecordType::A | RecordType::AAAA => {
            let address: IpAddr = value
                .as_str()
                .and_then(|s| s.parse().ok())
                .ok_or_else(invalid)?;
            let family_matches = match address {
                IpAddr::V4(_) => record_type == RecordType::A,
                IpAddr::V6(_) => record_type == RecordType::AAAA,
            };
            if !family_matches {
                return Err(invalid());
            }
            Ok(RecordData::Address(address))
        }
        RecordType::CNAME | RecordType::PTR | RecordType::NS => value
            .as_str()
            .map(|name| RecordData::Name(tierdns_domain::normalize_name(name)))
            .ok_or_else(invalid),
        RecordType::MX => match value {
            Value::String(exchange) => Ok(RecordData::Mail {
                preference: None,
                exchange: exchange.clone(),
            }),
            Value::Object(fields) => {
                let exchange = fields
                    .get("exchange")
                    .and_then(Value::as_str)
                    .ok_or_else(invalid)?
                    .to_string();
                let preference = match fields.get("preference") {
                    None | Some(Value::Null) => None,
                    Some(pref) => Some(
                        pref.as_u64()
                            .and_then(|p| u16::try_from(p).ok())
                            .ok_or_else(invalid)?,
                    ),
                };
                Ok(RecordData::Mail {
                    preference,
                    exchange,
                })
            }
            _ => Err(invalid()),
        },
        RecordType::TXT => match value {
            Value::String(text) => Ok(RecordData::text(text.clone())),
            Value::Array(parts) => parts
                .iter()
                .map(|part| part.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
                .map(RecordData::Text)
                .ok_or_else(invalid),
            _ => Err(invalid()),
        },
        _ => match value {
            Value::Array(bytes) => bytes
                .iter()
                .map(|b| b.as_u64().and_then(|b| u8::try_from(b).ok()))
                .collect::<Option<Vec<u8>>>()
                .map(RecordData::Opaque)
                .ok_or_else(invalid),
            _ => Err(invalid()),
        },
    }
}

fn is_opaque(record_type: RecordType) -> bool {
    !matches!(
        record_type,
        RecordType::A
            | RecordType::AAAA
            | RecordType::CNAME
            | RecordType::PTR
            | RecordType::NS
            | RecordType::MX
            | RecordType::TXT
    )
}

fn is_byte_array(items: &[Value]) -> bool {
    items.first().is_some_and(Value::is_number)
}
