//! Event container
//!
//! Wraps the raw ingested payload (content type + bytes) and owns a
//! compute-once cached decode. The first call to `envelope()` decodes and
//! stores the result; every later call returns the stored value. `OnceLock`
//! makes the cache idempotent under concurrent readers, which matches how
//! containers are shared (`Arc`) between the history buffer and live
//! subscribers.

use std::sync::OnceLock;

use bytes::Bytes;

use crate::decode::decode;
use crate::envelope::Envelope;
use crate::kind::EventKind;

/// Immutable raw payload with a lazily-decoded envelope
#[derive(Debug)]
pub struct EventContainer {
    content_type: String,
    data: Bytes,
    parsed: OnceLock<Envelope>,
}

impl EventContainer {
    /// Wrap raw ingested bytes
    pub fn new(content_type: impl Into<String>, data: Bytes) -> Self {
        Self {
            content_type: content_type.into(),
            data,
            parsed: OnceLock::new(),
        }
    }

    /// The decoded envelope; decoded at most once and cached
    ///
    /// Decoding never fails - malformed input degrades to an empty header
    /// and raw payloads.
    pub fn envelope(&self) -> &Envelope {
        self.parsed.get_or_init(|| decode(&self.data))
    }

    /// Kinds of the typed items in this container, in item order
    ///
    /// Items without a wire `type` tag are skipped.
    pub fn event_kinds(&self) -> Vec<EventKind> {
        self.envelope()
            .items
            .iter()
            .filter(|item| item.header.item_type.is_some())
            .map(|item| item.kind())
            .collect()
    }

    /// Event identifier from the envelope header, if present
    pub fn event_id(&self) -> Option<&str> {
        self.envelope().event_id()
    }

    /// The content type the payload arrived with
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// The raw payload bytes
    pub fn data(&self) -> &Bytes {
        &self.data
    }
}

#[cfg(test)]
#[path = "container_test.rs"]
mod tests;
