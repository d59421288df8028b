//! Envelope data model
//!
//! An envelope is one wire message: a header mapping followed by an ordered
//! sequence of items. Every field is optional on the wire; typed accessors
//! return `None` rather than failing when a field is absent or mistyped.

use bytes::Bytes;
use serde_json::{Map, Value};

use crate::kind::EventKind;

/// One decoded wire message: header plus ordered items
#[derive(Debug, Clone, Default)]
pub struct Envelope {
    /// Envelope-level header
    pub header: EnvelopeHeader,
    /// Items in wire order
    pub items: Vec<Item>,
}

impl Envelope {
    /// Event identifier from the envelope header, if present
    pub fn event_id(&self) -> Option<&str> {
        self.header.event_id()
    }
}

/// Envelope header: an open mapping with a few well-known fields
#[derive(Debug, Clone, Default)]
pub struct EnvelopeHeader(Map<String, Value>);

impl EnvelopeHeader {
    /// Wrap a decoded JSON object
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Event identifier (`event_id`), if present
    pub fn event_id(&self) -> Option<&str> {
        self.0.get("event_id").and_then(Value::as_str)
    }

    /// Sent-at timestamp (`sent_at`) as the raw wire string, if present
    pub fn sent_at(&self) -> Option<&str> {
        self.0.get("sent_at").and_then(Value::as_str)
    }

    /// Trace linkage (`trace`), if present
    pub fn trace(&self) -> Option<&Value> {
        self.0.get("trace")
    }

    /// Arbitrary header field lookup
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// True when the header carries no fields (e.g. a malformed header line)
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The underlying field map
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// One self-describing unit within an envelope
#[derive(Debug, Clone)]
pub struct Item {
    /// Item header (type discriminator, payload length)
    pub header: ItemHeader,
    /// Decoded payload, or raw bytes when decoding failed
    pub payload: Payload,
}

impl Item {
    /// Classify this item into a closed event kind
    pub fn kind(&self) -> EventKind {
        EventKind::classify(self)
    }

    /// Payload as a JSON value, if it decoded
    pub fn payload_json(&self) -> Option<&Value> {
        self.payload.as_json()
    }
}

/// Item header: `type` discriminator plus declared payload byte length
#[derive(Debug, Clone, Default)]
pub struct ItemHeader {
    /// Wire `type` tag (`event`, `transaction`, `log`, ...)
    pub item_type: Option<String>,
    /// Declared payload byte count
    pub length: Option<usize>,
}

impl ItemHeader {
    /// Build from a decoded JSON object; unknown fields are dropped
    pub fn from_fields(fields: &Map<String, Value>) -> Self {
        Self {
            item_type: fields
                .get("type")
                .and_then(Value::as_str)
                .map(str::to_owned),
            length: fields
                .get("length")
                .and_then(Value::as_u64)
                .map(|n| n as usize),
        }
    }
}

/// Item payload: JSON when it decodes, raw bytes otherwise
#[derive(Debug, Clone)]
pub enum Payload {
    /// Payload decoded as JSON
    Json(Value),
    /// Payload retained as raw bytes after a failed decode
    Raw(Bytes),
}

impl Payload {
    /// The decoded JSON value, if any
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Raw(_) => None,
        }
    }

    /// The raw bytes, if decoding failed
    pub fn as_raw(&self) -> Option<&Bytes> {
        match self {
            Self::Json(_) => None,
            Self::Raw(bytes) => Some(bytes),
        }
    }

}
