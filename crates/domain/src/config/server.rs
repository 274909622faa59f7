use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};

use super::errors::ConfigError;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_dns_port")]
    pub dns_port: u16,

    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Local address of the socket used to talk to upstream resolvers.
    #[serde(default = "default_upstream_bind_address")]
    pub upstream_bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            dns_port: default_dns_port(),
            bind_address: default_bind_address(),
            upstream_bind_address: default_upstream_bind_address(),
        }
    }
}

impl ServerConfig {
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.dns_port)
    }

    /// Works for IPv6 bind addresses too, which `listen_address` cannot express.
    pub fn listen_socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.bind_address.parse().map_err(|_| {
            ConfigError::Validation(format!("Invalid bind address '{}'", self.bind_address))
        })?;
        Ok(SocketAddr::new(ip, self.dns_port))
    }

    pub fn upstream_socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.upstream_bind_address.parse().map_err(|_| {
            ConfigError::Validation(format!(
                "Invalid upstream bind address '{}'",
                self.upstream_bind_address
            ))
        })
    }
}

fn default_dns_port() -> u16 {
    53
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_upstream_bind_address() -> String {
    "0.0.0.0:0".to_string()
}
