pub mod blocklist_repository;
pub mod record_repository;
mod record_row_mapper;

pub use blocklist_repository::SqliteBlocklistRepository;
pub use record_repository::SqliteRecordRepository;
