use clap::Parser;
use std::sync::Arc;
use tierdns_domain::{CliOverrides, Config};
use tierdns_jobs::{BlocklistSyncJob, CacheMaintenanceJob, JobRunner};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "tierdns")]
#[command(version)]
#[command(about = "TierDNS - caching, filtering DNS resolver")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// DNS server port
    #[arg(short = 'd', long)]
    dns_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Database path
    #[arg(long)]
    database: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Upstream resolver as ip:port; repeat to set the failover order
    #[arg(short = 'u', long = "upstream", value_name = "ADDR")]
    upstreams: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_port: cli.dns_port,
        bind_address: cli.bind,
        database_path: cli.database,
        log_level: cli.log_level,
        upstream_servers: cli.upstreams,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting TierDNS v{}", env!("CARGO_PKG_VERSION"));
    match cli.config.clone().or_else(Config::get_config_path) {
        Some(path) => info!(config_file = %path, "Configuration loaded"),
        None => info!("No configuration file found, using defaults"),
    }

    let pool = bootstrap::init_database(&config.database).await?;
    let repos = di::Repositories::new(pool);

    let sockets = server::bind_sockets(&config.server)?;
    let dns_services = di::DnsServices::new(&config, &repos, &sockets).await?;

    let shutdown = CancellationToken::new();

    let mut jobs = JobRunner::new()
        .with_cache_maintenance(
            CacheMaintenanceJob::new(dns_services.cache_maintenance.clone())
                .with_interval(config.cache.sweep_interval_secs),
        )
        .with_shutdown_token(shutdown.clone());
    if config.blocking.reload_interval_secs > 0 {
        jobs = jobs.with_blocklist_sync(
            BlocklistSyncJob::new(Arc::clone(&dns_services.blocklist))
                .with_interval(config.blocking.reload_interval_secs),
        );
    }
    jobs.start().await;

    let server_shutdown = shutdown.clone();
    let dns_server = tokio::spawn(async move {
        server::run_dns_server(sockets, &dns_services, server_shutdown).await;
    });

    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!(error = %e, "Failed to listen for shutdown signal"),
    }

    shutdown.cancel();
    if let Err(e) = dns_server.await {
        error!(error = %e, "DNS server task failed");
    }

    info!("Server shutdown complete");
    Ok(())
}
