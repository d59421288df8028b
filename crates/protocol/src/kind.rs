//! Event kind classification
//!
//! Kinds are a closed set derived from an item's wire `type` tag plus shape
//! predicates on the decoded payload; the wire tag alone is not trusted.
//! Anything that matches no predicate is `Unrecognized` and renders to
//! nothing downstream.

use serde_json::Value;

use crate::envelope::Item;

/// Closed classification of envelope items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Error event (exception or message event)
    Error,
    /// Trace / transaction with spans
    Trace,
    /// Batch of structured log entries
    Log,
    /// Anything the relay has no renderer for
    Unrecognized,
}

impl EventKind {
    /// Classify an item by wire tag and payload shape
    pub fn classify(item: &Item) -> Self {
        let item_type = item.header.item_type.as_deref();
        let payload = item.payload.as_json();

        match item_type {
            Some("event") => {
                // An event is an error when it carries an exception or a
                // plain message; other event shapes are not renderable.
                if has_field(payload, "exception") || has_field(payload, "message") {
                    Self::Error
                } else if has_field(payload, "spans") {
                    // Some SDKs ship transactions under the event tag
                    Self::Trace
                } else {
                    Self::Unrecognized
                }
            }
            Some("transaction") => Self::Trace,
            Some("log") => {
                if has_field(payload, "items") {
                    Self::Log
                } else {
                    Self::Unrecognized
                }
            }
            _ => Self::Unrecognized,
        }
    }

    /// Stable lowercase name (used for SSE event names and CLI filters)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Trace => "trace",
            Self::Log => "log",
            Self::Unrecognized => "unrecognized",
        }
    }

    /// Parse a CLI filter token; `None` for unknown tokens
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "error" | "errors" => Some(Self::Error),
            "trace" | "traces" | "transaction" => Some(Self::Trace),
            "log" | "logs" => Some(Self::Log),
            _ => None,
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn has_field(payload: Option<&Value>, key: &str) -> bool {
    payload
        .and_then(Value::as_object)
        .map(|fields| fields.contains_key(key))
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "kind_test.rs"]
mod tests;
