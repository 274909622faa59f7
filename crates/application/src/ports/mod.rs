mod blocklist_repository;
mod cache_maintenance_port;
mod cache_store;
mod datagram_sender;
mod record_repository;

pub use blocklist_repository::BlocklistRepository;
pub use cache_maintenance_port::{CacheMaintenancePort, CacheSweepOutcome};
pub use cache_store::CacheStore;
pub use datagram_sender::DatagramSender;
pub use record_repository::RecordRepository;
