use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

use super::errors::ConfigError;

pub const DEFAULT_UPSTREAM_TIMEOUT_MS: u64 = 2000;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// Resolvers in priority order, `"ip:port"`.
    #[serde(default = "default_servers")]
    pub servers: Vec<String>,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default)]
    pub on_exhaustion: ExhaustionPolicy,
}

/// What happens once every upstream has timed out for a query.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExhaustionPolicy {
    #[default]
    Servfail,

    Silent,
}

impl ExhaustionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Servfail => "servfail",
            Self::Silent => "silent",
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            servers: default_servers(),
            timeout_ms: default_timeout_ms(),
            on_exhaustion: ExhaustionPolicy::default(),
        }
    }
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn socket_addrs(&self) -> Result<Vec<SocketAddr>, ConfigError> {
        self.servers
            .iter()
            .map(|server| {
                server.parse::<SocketAddr>().map_err(|_| {
                    ConfigError::Validation(format!("Invalid upstream address '{}'", server))
                })
            })
            .collect()
    }
}

fn default_servers() -> Vec<String> {
    vec!["1.1.1.1:53".to_string(), "8.8.8.8:53".to_string()]
}

fn default_timeout_ms() -> u64 {
    DEFAULT_UPSTREAM_TIMEOUT_MS
}
