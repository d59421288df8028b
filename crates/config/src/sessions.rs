//! Session lifecycle configuration

use std::time::Duration;

use serde::Deserialize;

/// Session idle eviction configuration
///
/// # Example
///
/// ```toml
/// [sessions]
/// evict_idle = true
/// max_idle_secs = 3600
/// sweep_interval_secs = 60
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SessionsConfig {
    /// Whether idle sessions are dropped at all
    /// Default: true
    pub evict_idle: bool,

    /// Idle window in seconds after which a session is dropped
    /// Default: 3600 (one hour)
    pub max_idle_secs: u64,

    /// How often the maintenance sweep runs, in seconds
    /// Default: 60
    pub sweep_interval_secs: u64,
}

impl SessionsConfig {
    /// Idle window as a duration
    pub fn max_idle(&self) -> Duration {
        Duration::from_secs(self.max_idle_secs)
    }

    /// Sweep interval as a duration
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}

impl Default for SessionsConfig {
    fn default() -> Self {
        Self {
            evict_idle: true,
            max_idle_secs: 3600,
            sweep_interval_secs: 60,
        }
    }
}
