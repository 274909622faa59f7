pub mod blocking;
pub mod cache;
pub mod database;
pub mod errors;
pub mod logging;
pub mod root;
pub mod server;
pub mod upstream;

pub use blocking::BlockingConfig;
pub use cache::{CacheConfig, DEFAULT_ANSWER_TTL};
pub use database::DatabaseConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
pub use upstream::{ExhaustionPolicy, UpstreamConfig, DEFAULT_UPSTREAM_TIMEOUT_MS};
