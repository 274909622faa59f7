use async_trait::async_trait;
use sqlx::SqlitePool;
use tierdns_application::ports::BlocklistRepository;
use tierdns_domain::{BlockedDomain, DomainError};
use tracing::{debug, error};

pub struct SqliteBlocklistRepository {
    pool: SqlitePool,
}

impl SqliteBlocklistRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BlocklistRepository for SqliteBlocklistRepository {
    async fn get_all(&self) -> Result<Vec<BlockedDomain>, DomainError> {
        let rows = sqlx::query_as::<_, (i64, String)>("SELECT id, name FROM blocklist ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to read blocklist");
                DomainError::DatabaseError(e.to_string())
            })?;

        debug!(rows = rows.len(), "Blocklist scanned");

        Ok(rows
            .into_iter()
            .map(|(id, name)| BlockedDomain::with_id(id, &name))
            .collect())
    }
}
