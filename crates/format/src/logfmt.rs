//! Logfmt formatter
//!
//! key=value pairs, one event per line. Values with spaces, quotes, or
//! equals signs are double-quoted; absent fields produce no pair at all.
//!
//! # Example Output
//!
//! ```text
//! kind=error event_id=4c03 exception=TypeError message="x is not a function" file=app.js line=42
//! kind=trace name="GET /users" duration_ms=182.4 spans=7
//! kind=log level=warning body="rate limit approaching" attr.user_id=12
//! ```

use std::fmt::Write;

use serde_json::Value;

use peek_protocol::EnvelopeHeader;

use crate::view::{ErrorView, LogView, TraceView};
use crate::{FormatFamily, Formatter};

/// Logfmt formatter
#[derive(Debug, Clone, Copy, Default)]
pub struct LogfmtFormatter;

impl Formatter for LogfmtFormatter {
    fn family(&self) -> FormatFamily {
        FormatFamily::Logfmt
    }

    fn render_error(&self, view: &ErrorView, _header: &EnvelopeHeader) -> Vec<String> {
        let mut line = String::from("kind=error");

        push_opt(&mut line, "event_id", view.event_id.as_deref());
        push_opt(&mut line, "level", view.level.as_deref());
        push_opt(&mut line, "exception", view.exception_type.as_deref());
        push_opt(&mut line, "message", view.message.as_deref());
        if let Some(ref frame) = view.frame {
            push_opt(&mut line, "file", frame.file.as_deref());
            if let Some(lineno) = frame.line {
                let _ = write!(line, " line={}", lineno);
            }
            push_opt(&mut line, "function", frame.function.as_deref());
        }

        vec![line]
    }

    fn render_trace(&self, view: &TraceView, _header: &EnvelopeHeader) -> Vec<String> {
        let mut line = String::from("kind=trace");

        push_opt(&mut line, "name", view.name.as_deref());
        if let Some(duration_ms) = view.duration_ms {
            let _ = write!(line, " duration_ms={:.1}", duration_ms);
        }
        push_opt(&mut line, "status", view.status.as_deref());
        if let Some(span_count) = view.span_count {
            let _ = write!(line, " spans={}", span_count);
        }
        push_opt(&mut line, "trace_id", view.trace_id.as_deref());

        vec![line]
    }

    fn render_log(&self, view: &LogView, _header: &EnvelopeHeader) -> Vec<String> {
        view.entries
            .iter()
            .map(|entry| {
                let mut line = String::from("kind=log");
                push_opt(&mut line, "level", entry.level.as_deref());
                push_opt(&mut line, "body", entry.body.as_deref());
                for (key, value) in &entry.attributes {
                    push_pair(&mut line, &format!("attr.{}", key), &value_text(value));
                }
                line
            })
            .collect()
    }
}

/// Append ` key=value` when the value is present
fn push_opt(line: &mut String, key: &str, value: Option<&str>) {
    if let Some(value) = value {
        push_pair(line, key, value);
    }
}

fn push_pair(line: &mut String, key: &str, value: &str) {
    let _ = write!(line, " {}={}", key, quote(value));
}

/// Quote a value when it would break the pair syntax
fn quote(value: &str) -> String {
    let needs_quotes = value.is_empty()
        || value
            .chars()
            .any(|c| c.is_whitespace() || c == '"' || c == '=');
    if needs_quotes {
        format!("\"{}\"", value.replace('"', "\\\""))
    } else {
        value.to_owned()
    }
}

/// Plain text for an attribute value (strings unquoted, the rest as JSON)
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "logfmt_test.rs"]
mod tests;
