use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::debug;

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS records (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL COLLATE NOCASE,
        record_type TEXT NOT NULL COLLATE NOCASE,
        content TEXT NOT NULL,
        ttl INTEGER
    )",
    "CREATE INDEX IF NOT EXISTS idx_records_name_type ON records(name, record_type)",
    "CREATE INDEX IF NOT EXISTS idx_records_type_content ON records(record_type, content)",
    "CREATE TABLE IF NOT EXISTS blocklist (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE COLLATE NOCASE
    )",
];

/// Opens the document store, creating the file if needed, and makes sure
/// the `records` and `blocklist` tables exist.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    initialize_schema(&pool).await?;

    Ok(pool)
}

/// Idempotent; safe to run on every startup.
pub async fn initialize_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    debug!("Database schema ready");
    Ok(())
}
