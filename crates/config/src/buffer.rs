//! History buffer configuration

use serde::Deserialize;

/// Default history capacity per session
pub const DEFAULT_BUFFER_CAPACITY: usize = 100;

/// Per-session history buffer configuration
///
/// # Example
///
/// ```toml
/// [buffer]
/// capacity = 250
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BufferConfig {
    /// How many containers each session retains before FIFO eviction
    /// Default: 100
    pub capacity: usize,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_BUFFER_CAPACITY,
        }
    }
}
