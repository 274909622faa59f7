use super::record_row_mapper::{
    row_to_record, RecordRow, RECORD_SELECT_BY_NAME_AND_TYPE, RECORD_SELECT_NAME_BY_ADDRESS,
};
use async_trait::async_trait;
use sqlx::SqlitePool;
use std::net::Ipv4Addr;
use tierdns_application::ports::RecordRepository;
use tierdns_domain::{normalize_name, DomainError, RRset, RecordType};
use tracing::{error, instrument, warn};

/// Operator-configured records kept in the `records` table.
pub struct SqliteRecordRepository {
    pool: SqlitePool,
}

impl SqliteRecordRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordRepository for SqliteRecordRepository {
    #[instrument(skip(self))]
    async fn find_by_name_and_type(
        &self,
        name: &str,
        record_type: RecordType,
    ) -> Result<Option<RRset>, DomainError> {
        let row = sqlx::query_as::<_, RecordRow>(RECORD_SELECT_BY_NAME_AND_TYPE)
            .bind(normalize_name(name))
            .bind(record_type.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to query records");
                DomainError::DatabaseError(e.to_string())
            })?;

        let Some(row) = row else {
            return Ok(None);
        };

        match row_to_record(row) {
            Ok(record) => Ok(Some(record.into_rrset())),
            Err(e) => {
                warn!(domain = %name, record_type = %record_type, error = %e, "Ignoring undecodable record");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self))]
    async fn find_name_by_address(
        &self,
        address: Ipv4Addr,
    ) -> Result<Option<String>, DomainError> {
        let name = sqlx::query_scalar::<_, String>(RECORD_SELECT_NAME_BY_ADDRESS)
            .bind(address.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to query records by address");
                DomainError::DatabaseError(e.to_string())
            })?;

        Ok(name.map(|n| normalize_name(&n)))
    }
}
