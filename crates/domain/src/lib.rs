//! TierDNS domain layer
pub mod blocklist;
pub mod config;
pub mod dns_record;
pub mod domain_record;
pub mod errors;
pub mod question;
pub mod reverse_lookup;

pub use blocklist::BlockedDomain;
pub use config::{
    BlockingConfig, CacheConfig, CliOverrides, Config, ConfigError, DatabaseConfig,
    ExhaustionPolicy, LoggingConfig, ServerConfig, UpstreamConfig,
};
pub use dns_record::{RRset, RecordData, RecordType, ResourceAnswer};
pub use domain_record::DomainRecord;
pub use errors::DomainError;
pub use question::{normalize_name, Question};
pub use reverse_lookup::parse_reverse_name;
