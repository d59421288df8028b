//! Peek Configuration
//!
//! TOML-based configuration loading with sensible defaults.
//! A missing or empty config just works - only specify what you change.
//!
//! # Parsing
//!
//! Use the `FromStr` trait to parse configuration:
//!
//! ```
//! use peek_config::Config;
//! use std::str::FromStr;
//!
//! let config = Config::from_str("[server]\nport = 9000").unwrap();
//! ```
//!
//! # Example Config
//!
//! ```toml
//! [server]
//! port = 8969
//!
//! [buffer]
//! capacity = 100
//!
//! [sessions]
//! max_idle_secs = 3600
//!
//! [log]
//! level = "info"
//! ```

mod buffer;
mod error;
mod logging;
mod server;
mod sessions;

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

pub use buffer::{BufferConfig, DEFAULT_BUFFER_CAPACITY};
pub use error::{ConfigError, Result};
pub use logging::{LogConfig, LogFormat, LogLevel};
pub use server::{ServerConfig, DEFAULT_MAX_PAYLOAD_SIZE, DEFAULT_PORT};
pub use sessions::SessionsConfig;

/// File checked when no explicit config path is given
pub const DEFAULT_CONFIG_PATH: &str = "peek.toml";

/// Main configuration structure
///
/// All sections are optional with sensible defaults.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings
    pub server: ServerConfig,

    /// Per-session history buffer settings
    pub buffer: BufferConfig,

    /// Session idle eviction settings
    pub sessions: SessionsConfig,

    /// Logging configuration
    pub log: LogConfig,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or contains invalid TOML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_str(&contents)
    }

    /// Load from an explicit path, or from `peek.toml` when present, or
    /// fall back to defaults
    ///
    /// An explicit path that cannot be read is an error; the implicit
    /// default path is only used when it exists.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_PATH);
                if default.exists() {
                    Self::from_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn parse(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(ConfigError::invalid_value(
                "server",
                "port",
                "must not be 0",
            ));
        }
        if self.buffer.capacity == 0 {
            return Err(ConfigError::invalid_value(
                "buffer",
                "capacity",
                "must be at least 1",
            ));
        }
        if self.sessions.evict_idle && self.sessions.sweep_interval_secs == 0 {
            return Err(ConfigError::invalid_value(
                "sessions",
                "sweep_interval_secs",
                "must be at least 1 when evict_idle is enabled",
            ));
        }
        Ok(())
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert_eq!(config.buffer.capacity, DEFAULT_BUFFER_CAPACITY);
    }

    #[test]
    fn test_full_config_parse() {
        let toml = r#"
[server]
address = "0.0.0.0"
port = 9000
max_payload_size = 1024

[buffer]
capacity = 25

[sessions]
evict_idle = false
max_idle_secs = 120

[log]
level = "debug"
format = "json"
"#;
        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.server.bind_address(), "0.0.0.0:9000");
        assert_eq!(config.server.max_payload_size, 1024);
        assert_eq!(config.buffer.capacity, 25);
        assert!(!config.sessions.evict_idle);
        assert_eq!(config.sessions.max_idle_secs, 120);
        assert_eq!(config.log.level, LogLevel::Debug);
        assert_eq!(config.log.format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(Config::from_str("invalid { toml").is_err());
    }

    #[test]
    fn test_zero_port_rejected() {
        let err = Config::from_str("[server]\nport = 0").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(Config::from_str("[buffer]\ncapacity = 0").is_err());
    }

    #[test]
    fn test_zero_sweep_interval_rejected_when_evicting() {
        assert!(Config::from_str("[sessions]\nsweep_interval_secs = 0").is_err());
        // Fine when eviction is off
        Config::from_str("[sessions]\nevict_idle = false\nsweep_interval_secs = 0").unwrap();
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = 9123").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.server.port, 9123);
    }

    #[test]
    fn test_from_missing_file() {
        let err = Config::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::IoError { .. }));
    }

    #[test]
    fn test_load_explicit_missing_is_error() {
        assert!(Config::load(Some(std::path::Path::new("/nope.toml"))).is_err());
    }
}
