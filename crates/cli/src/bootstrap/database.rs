use sqlx::SqlitePool;
use tierdns_domain::DatabaseConfig;
use tierdns_infrastructure::database::create_pool;
use tracing::{error, info};

pub async fn init_database(cfg: &DatabaseConfig) -> anyhow::Result<SqlitePool> {
    let database_url = format!("sqlite:{}", cfg.path);
    info!(database = %cfg.path, "Initializing database");

    let pool = create_pool(&database_url, cfg.max_connections)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to initialize database");
            anyhow::anyhow!(e)
        })?;

    info!(
        max_connections = cfg.max_connections,
        "Database initialized successfully"
    );

    Ok(pool)
}
