//! Shared view extraction for renderers
//!
//! Every formatter family renders the same projected views of a decoded
//! item, so the shape-dependent digging lives here once. Extraction is
//! lenient: absent or mistyped fields become `None` and are simply omitted
//! downstream, never rendered as a literal placeholder.

use serde_json::{Map, Value};

use peek_protocol::{EnvelopeHeader, Item};

/// Projected view of an error event
#[derive(Debug, Clone, Default)]
pub struct ErrorView {
    /// Event identifier (payload `event_id`, else the envelope header's)
    pub event_id: Option<String>,
    /// Severity level
    pub level: Option<String>,
    /// Exception type, e.g. `TypeError`
    pub exception_type: Option<String>,
    /// Exception value or plain message
    pub message: Option<String>,
    /// Most relevant stack frame
    pub frame: Option<FrameView>,
}

/// One stack frame
#[derive(Debug, Clone, Default)]
pub struct FrameView {
    pub file: Option<String>,
    pub line: Option<u64>,
    pub function: Option<String>,
    pub in_app: bool,
}

/// Projected view of a trace / transaction
#[derive(Debug, Clone, Default)]
pub struct TraceView {
    /// Operation name
    pub name: Option<String>,
    /// End minus start timestamp, in milliseconds
    pub duration_ms: Option<f64>,
    /// Status when not the default `ok`
    pub status: Option<String>,
    /// Child span count, when spans are present
    pub span_count: Option<usize>,
    /// Trace identifier from the trace context
    pub trace_id: Option<String>,
}

/// Projected view of a log item (one wire item, many entries)
#[derive(Debug, Clone, Default)]
pub struct LogView {
    pub entries: Vec<LogEntryView>,
}

/// One log entry inside a log item
#[derive(Debug, Clone, Default)]
pub struct LogEntryView {
    pub level: Option<String>,
    pub body: Option<String>,
    /// Flattened attribute map (typed wrappers unwrapped to plain values)
    pub attributes: Map<String, Value>,
}

impl ErrorView {
    /// Extract from a decoded error item; `None` when the payload is raw
    pub fn from_item(item: &Item, header: &EnvelopeHeader) -> Option<Self> {
        let payload = item.payload_json()?.as_object()?;

        let event_id = get_str(payload, "event_id")
            .or_else(|| header.event_id().map(str::to_owned));
        let level = get_str(payload, "level");

        // First exception value carries the type, message, and stacktrace
        let exception = payload
            .get("exception")
            .and_then(|e| e.get("values"))
            .and_then(Value::as_array)
            .and_then(|values| values.first())
            .and_then(Value::as_object);

        let exception_type = exception.and_then(|e| get_str(e, "type"));
        let message = exception
            .and_then(|e| get_str(e, "value"))
            .or_else(|| plain_message(payload));

        let frame = exception
            .and_then(|e| e.get("stacktrace"))
            .and_then(|s| s.get("frames"))
            .and_then(Value::as_array)
            .and_then(|frames| select_frame(frames));

        Some(Self {
            event_id,
            level,
            exception_type,
            message,
            frame,
        })
    }
}

impl TraceView {
    /// Extract from a decoded trace item; `None` when the payload is raw
    pub fn from_item(item: &Item) -> Option<Self> {
        let payload = item.payload_json()?.as_object()?;

        let name = get_str(payload, "transaction").or_else(|| get_str(payload, "name"));

        let start = payload.get("start_timestamp").and_then(Value::as_f64);
        let end = payload.get("timestamp").and_then(Value::as_f64);
        let duration_ms = match (start, end) {
            (Some(start), Some(end)) => Some((end - start) * 1000.0),
            _ => None,
        };

        let trace_context = payload
            .get("contexts")
            .and_then(|c| c.get("trace"))
            .and_then(Value::as_object);
        let status = trace_context
            .and_then(|t| get_str(t, "status"))
            .filter(|s| s != "ok");
        let trace_id = trace_context.and_then(|t| get_str(t, "trace_id"));

        let span_count = payload
            .get("spans")
            .and_then(Value::as_array)
            .map(|spans| spans.len());

        Some(Self {
            name,
            duration_ms,
            status,
            span_count,
            trace_id,
        })
    }
}

impl LogView {
    /// Extract from a decoded log item; `None` when the payload is raw
    pub fn from_item(item: &Item) -> Option<Self> {
        let payload = item.payload_json()?.as_object()?;
        let items = payload.get("items").and_then(Value::as_array)?;

        let entries = items
            .iter()
            .filter_map(Value::as_object)
            .map(|entry| LogEntryView {
                level: get_str(entry, "level"),
                body: get_str(entry, "body"),
                attributes: flatten_attributes(entry.get("attributes")),
            })
            .collect();

        Some(Self { entries })
    }
}

/// The most relevant frame: first flagged in-app, else the last frame
fn select_frame(frames: &[Value]) -> Option<FrameView> {
    let chosen = frames
        .iter()
        .find(|f| {
            f.get("in_app")
                .and_then(Value::as_bool)
                .unwrap_or(false)
        })
        .or_else(|| frames.last())?;

    let frame = chosen.as_object()?;
    Some(FrameView {
        file: get_str(frame, "filename").or_else(|| get_str(frame, "abs_path")),
        line: frame.get("lineno").and_then(Value::as_u64),
        function: get_str(frame, "function"),
        in_app: frame
            .get("in_app")
            .and_then(Value::as_bool)
            .unwrap_or(false),
    })
}

/// Message events carry either a plain string or `{formatted: ...}`
fn plain_message(payload: &Map<String, Value>) -> Option<String> {
    match payload.get("message")? {
        Value::String(s) => Some(s.clone()),
        Value::Object(fields) => get_str(fields, "formatted"),
        _ => None,
    }
}

/// Unwrap `{value, type}` attribute wrappers to plain values
fn flatten_attributes(attributes: Option<&Value>) -> Map<String, Value> {
    let Some(attributes) = attributes.and_then(Value::as_object) else {
        return Map::new();
    };

    attributes
        .iter()
        .map(|(key, value)| {
            let unwrapped = value
                .as_object()
                .and_then(|wrapper| wrapper.get("value"))
                .unwrap_or(value);
            (key.clone(), unwrapped.clone())
        })
        .collect()
}

fn get_str(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields.get(key).and_then(Value::as_str).map(str::to_owned)
}

#[cfg(test)]
#[path = "view_test.rs"]
mod tests;
