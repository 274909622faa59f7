use sqlx::SqlitePool;
use std::sync::Arc;
use tierdns_infrastructure::repositories::{SqliteBlocklistRepository, SqliteRecordRepository};

pub struct Repositories {
    pub blocklist: Arc<SqliteBlocklistRepository>,
    pub records: Arc<SqliteRecordRepository>,
}

impl Repositories {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            blocklist: Arc::new(SqliteBlocklistRepository::new(pool.clone())),
            records: Arc::new(SqliteRecordRepository::new(pool)),
        }
    }
}
