//! Structured JSON formatter
//!
//! One compact JSON object per line; absent fields are omitted from the
//! object rather than serialized as null.

use serde_json::{Map, Value};

use peek_protocol::EnvelopeHeader;

use crate::view::{ErrorView, LogView, TraceView};
use crate::{FormatFamily, Formatter};

/// Structured JSON formatter
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn family(&self) -> FormatFamily {
        FormatFamily::Json
    }

    fn render_error(&self, view: &ErrorView, _header: &EnvelopeHeader) -> Vec<String> {
        let mut fields = Map::new();
        fields.insert("kind".into(), "error".into());
        insert_opt(&mut fields, "event_id", view.event_id.as_deref());
        insert_opt(&mut fields, "level", view.level.as_deref());
        insert_opt(&mut fields, "exception", view.exception_type.as_deref());
        insert_opt(&mut fields, "message", view.message.as_deref());
        if let Some(ref frame) = view.frame {
            insert_opt(&mut fields, "file", frame.file.as_deref());
            if let Some(lineno) = frame.line {
                fields.insert("line".into(), lineno.into());
            }
            insert_opt(&mut fields, "function", frame.function.as_deref());
        }

        vec![Value::Object(fields).to_string()]
    }

    fn render_trace(&self, view: &TraceView, _header: &EnvelopeHeader) -> Vec<String> {
        let mut fields = Map::new();
        fields.insert("kind".into(), "trace".into());
        insert_opt(&mut fields, "name", view.name.as_deref());
        if let Some(duration_ms) = view.duration_ms {
            // Round to one decimal so output is stable across platforms
            let rounded = (duration_ms * 10.0).round() / 10.0;
            fields.insert("duration_ms".into(), rounded.into());
        }
        insert_opt(&mut fields, "status", view.status.as_deref());
        if let Some(span_count) = view.span_count {
            fields.insert("spans".into(), span_count.into());
        }
        insert_opt(&mut fields, "trace_id", view.trace_id.as_deref());

        vec![Value::Object(fields).to_string()]
    }

    fn render_log(&self, view: &LogView, _header: &EnvelopeHeader) -> Vec<String> {
        view.entries
            .iter()
            .map(|entry| {
                let mut fields = Map::new();
                fields.insert("kind".into(), "log".into());
                insert_opt(&mut fields, "level", entry.level.as_deref());
                insert_opt(&mut fields, "body", entry.body.as_deref());
                if !entry.attributes.is_empty() {
                    fields.insert(
                        "attributes".into(),
                        Value::Object(entry.attributes.clone()),
                    );
                }
                Value::Object(fields).to_string()
            })
            .collect()
    }
}

fn insert_opt(fields: &mut Map<String, Value>, key: &str, value: Option<&str>) {
    if let Some(value) = value {
        fields.insert(key.to_owned(), value.into());
    }
}

#[cfg(test)]
#[path = "json_test.rs"]
mod tests;
