//! Human-readable formatter
//!
//! Compact one-line-per-event output for terminals.
//!
//! # Example Output
//!
//! ```text
//! error [4c03...] TypeError: x is not a function (app.js:42 in onClick)
//! trace checkout.submit 182.4ms spans=7
//! log warning rate limit approaching
//! ```

use std::fmt::Write;

use peek_protocol::EnvelopeHeader;

use crate::view::{ErrorView, LogView, TraceView};
use crate::{FormatFamily, Formatter};

/// Human-readable formatter
#[derive(Debug, Clone, Copy, Default)]
pub struct HumanFormatter;

impl Formatter for HumanFormatter {
    fn family(&self) -> FormatFamily {
        FormatFamily::Human
    }

    fn render_error(&self, view: &ErrorView, _header: &EnvelopeHeader) -> Vec<String> {
        let mut line = String::from("error");

        if let Some(ref id) = view.event_id {
            let _ = write!(line, " [{}]", id);
        }
        if let Some(ref exception_type) = view.exception_type {
            let _ = write!(line, " {}", exception_type);
            if view.message.is_some() {
                line.push(':');
            }
        }
        if let Some(ref message) = view.message {
            let _ = write!(line, " {}", message);
        }
        if let Some(ref frame) = view.frame {
            let mut location = String::new();
            if let Some(ref file) = frame.file {
                location.push_str(file);
                if let Some(lineno) = frame.line {
                    let _ = write!(location, ":{}", lineno);
                }
            }
            if let Some(ref function) = frame.function {
                if !location.is_empty() {
                    location.push_str(" in ");
                }
                location.push_str(function);
            }
            if !location.is_empty() {
                let _ = write!(line, " ({})", location);
            }
        }

        vec![line]
    }

    fn render_trace(&self, view: &TraceView, _header: &EnvelopeHeader) -> Vec<String> {
        let mut line = String::from("trace");

        if let Some(ref name) = view.name {
            let _ = write!(line, " {}", name);
        }
        if let Some(duration_ms) = view.duration_ms {
            let _ = write!(line, " {:.1}ms", duration_ms);
        }
        if let Some(ref status) = view.status {
            let _ = write!(line, " status={}", status);
        }
        if let Some(span_count) = view.span_count {
            let _ = write!(line, " spans={}", span_count);
        }

        vec![line]
    }

    fn render_log(&self, view: &LogView, _header: &EnvelopeHeader) -> Vec<String> {
        view.entries
            .iter()
            .map(|entry| {
                let mut line = String::from("log");
                if let Some(ref level) = entry.level {
                    let _ = write!(line, " {}", level);
                }
                if let Some(ref body) = entry.body {
                    let _ = write!(line, " {}", body);
                }
                line
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "human_test.rs"]
mod tests;
