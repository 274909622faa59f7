mod helpers;

use helpers::{decode, query_bytes, response_bytes, MockCacheStore};
use hickory_proto::rr::rdata::SOA;
use hickory_proto::rr::{Name, RData, RecordType as HickoryRecordType};
use std::net::IpAddr;
use std::str::FromStr;
use std::sync::Arc;
use tierdns_application::services::{DnsMessageCodec, ResponseCache, ResponseEncoder};
use tierdns_domain::{RecordData, RecordType, ResourceAnswer};

fn address(ip: &str) -> RecordData {
    RecordData::Address(ip.parse::<IpAddr>().unwrap())
}

fn answer(name: &str, record_type: RecordType, ttl: i64, data: RecordData) -> ResourceAnswer {
    ResourceAnswer::new(name, record_type, ttl, data)
}

fn make_cache() -> (Arc<MockCacheStore>, ResponseCache) {
    let store = Arc::new(MockCacheStore::new());
    let cache = ResponseCache::new(store.clone(), 8);
    (store, cache)
}

#[tokio::test]
async fn test_group_uses_minimum_ttl() {
    let (store, cache) = make_cache();

    let written = cache
        .store(&[
            answer("x", RecordType::A, 300, address("192.0.2.1")),
            answer("x", RecordType::A, 60, address("192.0.2.2")),
        ])
        .await;

    assert_eq!(written, 1);
    let writes = store.writes();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].0, "x:A");
    assert_eq!(writes[0].2, 60);

    let rrset = cache.resolve("x", RecordType::A).await.unwrap().unwrap();
    assert_eq!(rrset.ttl, Some(60));
    assert_eq!(rrset.content, vec![address("192.0.2.1"), address("192.0.2.2")]);
}

#[tokio::test]
async fn test_non_positive_ttl_is_never_cached() {
    let (store, cache) = make_cache();

    let written = cache
        .store(&[
            answer("zero.example", RecordType::A, 0, address("192.0.2.1")),
            answer("neg.example", RecordType::A, -5, address("192.0.2.2")),
            answer("mixed.example", RecordType::A, 30, address("192.0.2.3")),
            answer("mixed.example", RecordType::A, 0, address("192.0.2.4")),
        ])
        .await;

    assert_eq!(written, 0);
    assert_eq!(store.len(), 0);
    assert!(cache
        .resolve("zero.example", RecordType::A)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_groups_are_keyed_by_name_and_type() {
    let (store, cache) = make_cache();

    cache
        .store(&[
            answer("a.example", RecordType::A, 100, address("192.0.2.1")),
            answer("a.example", RecordType::AAAA, 100, address("2001:db8::1")),
            answer("b.example", RecordType::A, 100, address("192.0.2.2")),
        ])
        .await;

    let keys: Vec<String> = store.writes().into_iter().map(|(k, _, _)| k).collect();
    assert_eq!(keys, vec!["a.example:A", "a.example:AAAA", "b.example:A"]);
}

#[tokio::test]
async fn test_store_then_resolve_preserves_opaque_bytes() {
    let (_store, cache) = make_cache();
    let payload: Vec<u8> = (0u8..=255).collect();

    cache
        .store(&[answer(
            "blob.example",
            RecordType::Other(65),
            120,
            RecordData::Opaque(payload.clone()),
        )])
        .await;

    let rrset = cache
        .resolve("blob.example", RecordType::Other(65))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(rrset.content, vec![RecordData::Opaque(payload)]);
}

#[tokio::test]
async fn test_cname_chain_is_followed() {
    let (_store, cache) = make_cache();

    cache
        .store(&[
            answer(
                "a.com",
                RecordType::CNAME,
                300,
                RecordData::Name("b.com".to_string()),
            ),
            answer("b.com", RecordType::A, 300, address("1.2.3.4")),
        ])
        .await;

    let rrset = cache.resolve("a.com", RecordType::A).await.unwrap().unwrap();
    assert_eq!(rrset.record_type, RecordType::A);
    assert_eq!(rrset.content, vec![address("1.2.3.4")]);
}

#[tokio::test]
async fn test_bare_string_cname_pointer_is_followed() {
    let (store, cache) = make_cache();
    store.insert_raw("a.com:CNAME", "\"B.com.\"");
    store.insert_raw("b.com:A", r#"{"ttl":30,"data":[{"Address":"1.2.3.4"}]}"#);

    let rrset = cache.resolve("a.com", RecordType::A).await.unwrap().unwrap();
    assert_eq!(rrset.ttl, Some(30));
    assert_eq!(rrset.content, vec![address("1.2.3.4")]);
}

#[tokio::test]
async fn test_dead_end_chain_is_absent() {
    let (_store, cache) = make_cache();

    cache
        .store(&[answer(
            "a.com",
            RecordType::CNAME,
            300,
            RecordData::Name("nowhere.com".to_string()),
        )])
        .await;

    assert!(cache.resolve("a.com", RecordType::A).await.unwrap().is_none());
}

#[tokio::test]
async fn test_cyclic_chain_is_absent() {
    let (_store, cache) = make_cache();

    cache
        .store(&[
            answer("a.com", RecordType::CNAME, 300, RecordData::Name("b.com".into())),
            answer("b.com", RecordType::CNAME, 300, RecordData::Name("a.com".into())),
        ])
        .await;

    assert!(cache.resolve("a.com", RecordType::A).await.unwrap().is_none());
}

#[tokio::test]
async fn test_chain_longer_than_depth_is_absent() {
    let store = Arc::new(MockCacheStore::new());
    let cache = ResponseCache::new(store.clone(), 2);

    cache
        .store(&[
            answer("h0.example", RecordType::CNAME, 60, RecordData::Name("h1.example".into())),
            answer("h1.example", RecordType::CNAME, 60, RecordData::Name("h2.example".into())),
            answer("h2.example", RecordType::CNAME, 60, RecordData::Name("h3.example".into())),
            answer("h3.example", RecordType::A, 60, address("192.0.2.9")),
        ])
        .await;

    assert!(cache
        .resolve("h0.example", RecordType::A)
        .await
        .unwrap()
        .is_none());
    assert!(cache
        .resolve("h1.example", RecordType::A)
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn test_cname_question_returns_cname_entry_only() {
    let (_store, cache) = make_cache();

    cache
        .store(&[
            answer("a.com", RecordType::CNAME, 300, RecordData::Name("b.com".into())),
            answer("b.com", RecordType::CNAME, 300, RecordData::Name("c.com".into())),
        ])
        .await;

    let rrset = cache
        .resolve("a.com", RecordType::CNAME)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(rrset.content, vec![RecordData::Name("b.com".into())]);
    assert!(cache
        .resolve("c.com", RecordType::CNAME)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_corrupt_entry_is_a_miss() {
    let (store, cache) = make_cache();
    store.insert_raw("bad.example:A", "{not json");

    assert!(cache
        .resolve("bad.example", RecordType::A)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_lookup_is_case_insensitive() {
    let (_store, cache) = make_cache();

    cache
        .store(&[answer("Mixed.Example.", RecordType::A, 60, address("192.0.2.5"))])
        .await;

    assert!(cache
        .resolve("MIXED.example", RecordType::A)
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn test_store_errors_propagate_on_resolve() {
    let (store, cache) = make_cache();
    store.set_should_fail(true);

    assert_eq!(
        cache
            .store(&[answer("x", RecordType::A, 60, address("192.0.2.1"))])
            .await,
        0
    );
    assert!(cache.resolve("x", RecordType::A).await.is_err());
}

#[tokio::test]
async fn test_cached_soa_is_served_intact() {
    let (_store, cache) = make_cache();
    let soa = SOA::new(
        Name::from_str("ns1.example.com.").unwrap(),
        Name::from_str("hostmaster.example.com.").unwrap(),
        2024010101,
        7200,
        3600,
        1209600,
        300,
    );
    let upstream = response_bytes(
        7,
        "example.com.",
        vec![("example.com.", 600, RData::SOA(soa))],
    );

    let decoded = DnsMessageCodec::decode_response(&upstream).unwrap();
    assert_eq!(cache.store(&decoded.answers).await, 1);
    let rrset = cache
        .resolve("example.com", RecordType::SOA)
        .await
        .unwrap()
        .unwrap();

    let query = DnsMessageCodec::decode_query(&query_bytes(
        0x4242,
        "example.com.",
        HickoryRecordType::SOA,
    ))
    .unwrap();
    let served = decode(&ResponseEncoder::new(50).encode(&query, &rrset, false).unwrap());

    assert_eq!(served.answers().len(), 1);
    assert_eq!(served.answers()[0].ttl(), 600);
    match served.answers()[0].data() {
        RData::SOA(soa) => {
            assert_eq!(soa.mname().to_utf8(), "ns1.example.com.");
            assert_eq!(soa.rname().to_utf8(), "hostmaster.example.com.");
            assert_eq!(soa.serial(), 2024010101);
            assert_eq!(soa.refresh(), 7200);
            assert_eq!(soa.retry(), 3600);
            assert_eq!(soa.expire(), 1209600);
            assert_eq!(soa.minimum(), 300);
        }
        other => panic!("unexpected rdata {:?}", other),
    }
}
