//! Session identifiers
//!
//! Session ids are opaque strings supplied by callers; the registry never
//! infers identity. Generated ids are ULIDs: globally unique and sortable
//! by creation time.

use std::fmt;

use ulid::Ulid;

/// Opaque session identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(String);

impl SessionId {
    /// Wrap a caller-supplied identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh time-sortable identifier
    pub fn generate() -> Self {
        Self(Ulid::new().to_string().to_lowercase())
    }

    /// The identifier string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}
