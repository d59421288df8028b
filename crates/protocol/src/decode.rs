//! Envelope wire format decoder
//!
//! The wire format is line-oriented:
//!
//! ```text
//! <json-header>\n
//! <json-item-header-1>\n<item-1-payload-bytes>
//! <json-item-header-2>\n<item-2-payload-bytes>
//! ```
//!
//! Item headers carry `{type, length}`; `length` is the exact byte count of
//! the payload that follows, so payloads may contain embedded newlines and
//! binary data. When `length` is absent the payload is the next
//! newline-delimited segment.
//!
//! Failure policy: a header line that is not valid JSON decodes to an empty
//! map; a payload that is not valid JSON is retained as raw bytes; decoding
//! always continues with the next item. The decoder is pure and never fails.

use bytes::Bytes;
use serde_json::{Map, Value};
use tracing::debug;

use crate::envelope::{Envelope, EnvelopeHeader, Item, ItemHeader, Payload};
use crate::error::ProtocolError;

/// Decode envelope wire bytes
///
/// Never fails: malformed input degrades to empty headers and raw payloads.
pub fn decode(data: &[u8]) -> Envelope {
    let mut pos = 0;

    let header_line = take_line(data, &mut pos);
    let header = match parse_json_line(header_line) {
        Ok(fields) => EnvelopeHeader::new(fields),
        Err(e) => {
            debug!(error = %e, "envelope header line did not parse, using empty header");
            EnvelopeHeader::default()
        }
    };

    let mut items = Vec::new();
    while pos < data.len() {
        let header_line = take_line(data, &mut pos);
        if header_line.is_empty() {
            // Blank line between items (or trailing newline at the end)
            continue;
        }

        let item_header = match parse_json_line(header_line) {
            Ok(fields) => ItemHeader::from_fields(&fields),
            Err(e) => {
                debug!(error = %e, "item header line did not parse, using empty header");
                // No header, no declared payload: the next line must be read
                // as the next item header, not swallowed as a payload
                items.push(Item {
                    header: ItemHeader::default(),
                    payload: Payload::Raw(Bytes::new()),
                });
                continue;
            }
        };

        let payload_bytes = take_payload(data, &mut pos, item_header.length);
        let payload = decode_payload(payload_bytes, item_header.item_type.as_deref());

        items.push(Item {
            header: item_header,
            payload,
        });
    }

    Envelope { header, items }
}

/// Consume bytes up to (not including) the next newline; advances past it
fn take_line<'a>(data: &'a [u8], pos: &mut usize) -> &'a [u8] {
    let start = *pos;
    let end = data[start..]
        .iter()
        .position(|&b| b == b'\n')
        .map(|i| start + i)
        .unwrap_or(data.len());

    *pos = (end + 1).min(data.len());
    &data[start..end]
}

/// Consume an item payload
///
/// Length-prefixed when the item header declared a length (clamped to the
/// remaining bytes), otherwise the next newline-delimited segment. A single
/// newline after a length-prefixed payload is consumed as the item separator.
fn take_payload<'a>(data: &'a [u8], pos: &mut usize, length: Option<usize>) -> &'a [u8] {
    match length {
        Some(declared) => {
            let start = *pos;
            let available = data.len() - start;
            if declared > available {
                debug!(
                    error = %ProtocolError::TruncatedPayload { declared, available },
                    "clamping item payload to remaining bytes"
                );
            }
            let end = start + declared.min(available);
            *pos = end;
            if *pos < data.len() && data[*pos] == b'\n' {
                *pos += 1;
            }
            &data[start..end]
        }
        None => take_line(data, pos),
    }
}

/// Parse one header line as a JSON object
fn parse_json_line(line: &[u8]) -> Result<Map<String, Value>, ProtocolError> {
    if line.is_empty() {
        return Ok(Map::new());
    }
    match serde_json::from_slice::<Value>(line) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(other) => Err(ProtocolError::malformed_header(format!(
            "expected object, got {}",
            json_type_name(&other)
        ))),
        Err(e) => Err(ProtocolError::malformed_header(e.to_string())),
    }
}

/// Decode an item payload as JSON, injecting the item header's `type` so
/// downstream consumers can self-describe without re-reading the header.
/// Falls back to raw bytes when the payload is not JSON.
fn decode_payload(bytes: &[u8], item_type: Option<&str>) -> Payload {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(mut value) => {
            if let Value::Object(ref mut fields) = value {
                if let Some(t) = item_type {
                    fields
                        .entry("type")
                        .or_insert_with(|| Value::String(t.to_owned()));
                }
            }
            Payload::Json(value)
        }
        Err(e) => {
            debug!(
                error = %ProtocolError::malformed_payload(bytes.len(), e.to_string()),
                "item payload did not parse as JSON, retaining raw bytes"
            );
            Payload::Raw(Bytes::copy_from_slice(bytes))
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[path = "decode_test.rs"]
mod tests;
