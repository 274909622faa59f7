#![allow(dead_code)]

use async_trait::async_trait;
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{Name, RData, Record, RecordType as HickoryRecordType};
use hickory_proto::serialize::binary::BinEncodable;
use std::collections::HashMap;
use std::net::{Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tierdns_application::ports::{BlocklistRepository, CacheStore, DatagramSender, RecordRepository};
use tierdns_domain::{BlockedDomain, DomainError, RRset, RecordType};
use tokio::sync::RwLock;

pub struct MockBlocklistRepository {
    domains: Arc<RwLock<Vec<BlockedDomain>>>,
    should_fail: AtomicBool,
}

impl MockBlocklistRepository {
    pub fn new() -> Self {
        Self {
            domains: Arc::new(RwLock::new(Vec::new())),
            should_fail: AtomicBool::new(false),
        }
    }

    pub fn with_domains(domains: &[&str]) -> Self {
        let repo = Self::new();
        *repo.domains.try_write().unwrap() =
            domains.iter().map(|d| BlockedDomain::new(d)).collect();
        repo
    }

    pub async fn set_domains(&self, domains: &[&str]) {
        *self.domains.write().await = domains.iter().map(|d| BlockedDomain::new(d)).collect();
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl BlocklistRepository for MockBlocklistRepository {
    async fn get_all(&self) -> Result<Vec<BlockedDomain>, DomainError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::DatabaseError("blocklist unavailable".to_string()));
        }
        Ok(self.domains.read().await.clone())
    }
}

pub struct MockRecordRepository {
    records: Arc<RwLock<HashMap<(String, RecordType), RRset>>>,
    a_records: Arc<RwLock<HashMap<Ipv4Addr, String>>>,
    address_lookups: AtomicU64,
    should_fail: AtomicBool,
}

impl MockRecordRepository {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            a_records: Arc::new(RwLock::new(HashMap::new())),
            address_lookups: AtomicU64::new(0),
            should_fail: AtomicBool::new(false),
        }
    }

    pub async fn add(&self, name: &str, rrset: RRset) {
        if rrset.record_type == RecordType::A {
            for item in &rrset.content {
                if let tierdns_domain::RecordData::Address(std::net::IpAddr::V4(ip)) = item {
                    self.a_records.write().await.insert(*ip, name.to_string());
                }
            }
        }
        self.records
            .write()
            .await
            .insert((name.to_string(), rrset.record_type), rrset);
    }

    pub fn address_lookup_count(&self) -> u64 {
        self.address_lookups.load(Ordering::SeqCst)
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl RecordRepository for MockRecordRepository {
    async fn find_by_name_and_type(
        &self,
        name: &str,
        record_type: RecordType,
    ) -> Result<Option<RRset>, DomainError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::DatabaseError("records unavailable".to_string()));
        }
        Ok(self
            .records
            .read()
            .await
            .get(&(name.to_string(), record_type))
            .cloned())
    }

    async fn find_name_by_address(
        &self,
        address: Ipv4Addr,
    ) -> Result<Option<String>, DomainError> {
        self.address_lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.a_records.read().await.get(&address).cloned())
    }
}

/// In-memory cache store that records every write with its TTL.
pub struct MockCacheStore {
    entries: Mutex<HashMap<String, String>>,
    writes: Mutex<Vec<(String, String, u64)>>,
    should_fail: AtomicBool,
}

impl MockCacheStore {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            writes: Mutex::new(Vec::new()),
            should_fail: AtomicBool::new(false),
        }
    }

    pub fn insert_raw(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    pub fn writes(&self) -> Vec<(String, String, u64)> {
        self.writes.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl CacheStore for MockCacheStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::CacheError("cache unavailable".to_string()));
        }
        Ok(self.raw(key))
    }

    async fn set_with_expiry(
        &self,
        key: &str,
        value: String,
        ttl_secs: u64,
    ) -> Result<(), DomainError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::CacheError("cache unavailable".to_string()));
        }
        self.writes
            .lock()
            .unwrap()
            .push((key.to_string(), value.clone(), ttl_secs));
        self.entries.lock().unwrap().insert(key.to_string(), value);
        Ok(())
    }
}

/// Datagram sender that keeps every payload instead of sending it.
pub struct RecordingSender {
    sent: Mutex<Vec<(Vec<u8>, SocketAddr)>>,
}

impl RecordingSender {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<(Vec<u8>, SocketAddr)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn targets(&self) -> Vec<SocketAddr> {
        self.sent().into_iter().map(|(_, target)| target).collect()
    }

    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl DatagramSender for RecordingSender {
    async fn send_to(&self, payload: &[u8], target: SocketAddr) -> Result<(), DomainError> {
        self.sent.lock().unwrap().push((payload.to_vec(), target));
        Ok(())
    }
}

pub fn query_bytes(id: u16, name: &str, record_type: HickoryRecordType) -> Vec<u8> {
    let mut message = Message::new(id, MessageType::Query, OpCode::Query);
    message.set_recursion_desired(true);
    message.add_query(Query::query(Name::from_str(name).unwrap(), record_type));
    message.to_bytes().unwrap()
}

pub fn response_bytes(id: u16, name: &str, answers: Vec<(&str, u32, RData)>) -> Vec<u8> {
    let mut message = Message::new(id, MessageType::Response, OpCode::Query);
    message.add_query(Query::query(
        Name::from_str(name).unwrap(),
        HickoryRecordType::A,
    ));
    for (owner, ttl, rdata) in answers {
        message.add_answer(Record::from_rdata(Name::from_str(owner).unwrap(), ttl, rdata));
    }
    message.to_bytes().unwrap()
}

pub fn decode(bytes: &[u8]) -> Message {
    Message::from_vec(bytes).unwrap()
}
