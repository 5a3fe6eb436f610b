//! Server configuration.

use std::net::SocketAddr;
use std::path::Path;

use serde::Deserialize;

use crate::server::error::Error;

/// HTTP server configuration.
///
/// Every field is optional when deserializing; missing fields take the
/// values from [`ServerConfig::default`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// The address to bind to.
    pub addr: SocketAddr,
    /// The maximum number of concurrent connections.
    pub max_connections: usize,
    /// The read buffer size.
    pub read_buffer_size: usize,
    /// The largest request, head and body together, the server will buffer.
    pub max_request_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            max_connections: 1024,
            read_buffer_size: 8192,
            max_request_size: 32 * 1024 * 1024,
        }
    }
}

impl ServerConfig {
    /// Parse a configuration from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    fn validate(&self) -> Result<(), Error> {
        if self.max_connections == 0 {
            return Err(Error::ConfigError("max_connections must be greater than zero".to_string()));
        }
        if self.read_buffer_size == 0 {
            return Err(Error::ConfigError("read_buffer_size must be greater than zero".to_string()));
        }
        if self.max_request_size == 0 {
            return Err(Error::ConfigError("max_request_size must be greater than zero".to_string()));
        }
        Ok(())
    }
}
