//! Relay server configuration

use serde::Deserialize;

/// Default relay port
pub const DEFAULT_PORT: u16 = 8969;

/// Default maximum request payload size in bytes
pub const DEFAULT_MAX_PAYLOAD_SIZE: usize = 4 * 1024 * 1024;

/// HTTP server configuration
///
/// # Example
///
/// ```toml
/// [server]
/// address = "127.0.0.1"
/// port = 8969
/// max_payload_size = 4194304
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address
    /// Default: 127.0.0.1 (the relay is a local development tool)
    pub address: String,

    /// Listen port
    /// Default: 8969
    pub port: u16,

    /// Maximum accepted request body size in bytes
    /// Default: 4 MiB
    pub max_payload_size: usize,
}

impl ServerConfig {
    /// Full bind address string
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_owned(),
            port: DEFAULT_PORT,
            max_payload_size: DEFAULT_MAX_PAYLOAD_SIZE,
        }
    }
}
