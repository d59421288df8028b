//! Peek Protocol - Envelope wire format and event model
//!
//! This crate provides the types that flow through the relay:
//! - `Envelope` - one decoded wire message (header + ordered items)
//! - `Item` / `Payload` - self-describing units inside an envelope
//! - `EventKind` - closed classification (Error, Trace, Log, Unrecognized)
//! - `EventContainer` - raw bytes plus a compute-once cached decode
//!
//! # Design Principles
//!
//! - **Never panic on wire data**: malformed header lines decode to empty
//!   maps, malformed payloads are retained as raw bytes, and a single bad
//!   item never aborts the rest of the envelope.
//! - **Decode lazily, once**: `EventContainer` holds the raw payload and
//!   decodes on first access; the result is cached for its lifetime.
//! - **Arc-friendly**: containers are immutable after construction so they
//!   can be shared across the buffer and live subscribers without copies.

mod container;
mod decode;
mod envelope;
mod error;
mod kind;

pub use container::EventContainer;
pub use decode::decode;
pub use envelope::{Envelope, EnvelopeHeader, Item, ItemHeader, Payload};
pub use error::ProtocolError;
pub use kind::EventKind;

// Re-export bytes for convenience
pub use bytes::Bytes;

/// Result type for protocol operations
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Content type designating an envelope body on the ingestion endpoint
pub const ENVELOPE_CONTENT_TYPE: &str = "application/x-peek-envelope";
