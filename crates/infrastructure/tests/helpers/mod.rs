#![allow(dead_code)]
mod dns_server_mock;

pub use dns_server_mock::{MockUpstream, MOCK_ANSWER};

use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{Name, RecordType};
use hickory_proto::serialize::binary::BinEncodable;
use sqlx::SqlitePool;
use std::str::FromStr;
use tierdns_infrastructure::database::create_pool;

/// A single-connection in-memory database with the schema applied.
pub async fn test_pool() -> SqlitePool {
    create_pool("sqlite::memory:", 1).await.unwrap()
}

pub async fn insert_record(
    pool: &SqlitePool,
    name: &str,
    record_type: &str,
    content: &str,
    ttl: Option<i64>,
) {
    sqlx::query("INSERT INTO records (name, record_type, content, ttl) VALUES (?, ?, ?, ?)")
        .bind(name)
        .bind(record_type)
        .bind(content)
        .bind(ttl)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn insert_blocked(pool: &SqlitePool, name: &str) {
    sqlx::query("INSERT INTO blocklist (name) VALUES (?)")
        .bind(name)
        .execute(pool)
        .await
        .unwrap();
}

pub fn query_bytes(id: u16, name: &str, record_type: RecordType) -> Vec<u8> {
    let mut message = Message::new(id, MessageType::Query, OpCode::Query);
    message.set_recursion_desired(true);
    message.add_query(Query::query(Name::from_str(name).unwrap(), record_type));
    message.to_bytes().unwrap()
}
