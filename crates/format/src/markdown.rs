//! Narrative markdown formatter
//!
//! Bullet lines suitable for pasting into issues or chat.
//!
//! # Example Output
//!
//! ```text
//! - **Error** `TypeError`: x is not a function - in `onClick` (`app.js:42`)
//! - **Trace** `checkout.submit` took 182.4ms across 7 spans
//! - **Log** _warning_: rate limit approaching
//! ```

use std::fmt::Write;

use peek_protocol::EnvelopeHeader;

use crate::view::{ErrorView, LogView, TraceView};
use crate::{FormatFamily, Formatter};

/// Narrative markdown formatter
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownFormatter;

impl Formatter for MarkdownFormatter {
    fn family(&self) -> FormatFamily {
        FormatFamily::Markdown
    }

    fn render_error(&self, view: &ErrorView, _header: &EnvelopeHeader) -> Vec<String> {
        let mut line = String::from("- **Error**");

        if let Some(ref exception_type) = view.exception_type {
            let _ = write!(line, " `{}`", exception_type);
            if view.message.is_some() {
                line.push(':');
            }
        }
        if let Some(ref message) = view.message {
            let _ = write!(line, " {}", message);
        }
        if let Some(ref frame) = view.frame {
            if let Some(ref function) = frame.function {
                let _ = write!(line, " - in `{}`", function);
            }
            if let Some(ref file) = frame.file {
                match frame.line {
                    Some(lineno) => {
                        let _ = write!(line, " (`{}:{}`)", file, lineno);
                    }
                    None => {
                        let _ = write!(line, " (`{}`)", file);
                    }
                }
            }
        }
        if let Some(ref id) = view.event_id {
            let _ = write!(line, " [event `{}`]", id);
        }

        vec![line]
    }

    fn render_trace(&self, view: &TraceView, _header: &EnvelopeHeader) -> Vec<String> {
        let mut line = String::from("- **Trace**");

        if let Some(ref name) = view.name {
            let _ = write!(line, " `{}`", name);
        }
        if let Some(duration_ms) = view.duration_ms {
            let _ = write!(line, " took {:.1}ms", duration_ms);
        }
        if let Some(span_count) = view.span_count {
            let _ = write!(line, " across {} spans", span_count);
        }
        if let Some(ref status) = view.status {
            let _ = write!(line, " (status: {})", status);
        }

        vec![line]
    }

    fn render_log(&self, view: &LogView, _header: &EnvelopeHeader) -> Vec<String> {
        view.entries
            .iter()
            .map(|entry| {
                let mut line = String::from("- **Log**");
                if let Some(ref level) = entry.level {
                    let _ = write!(line, " _{}_", level);
                    if entry.body.is_some() {
                        line.push(':');
                    }
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
#[path = "markdown_test.rs"]
mod tests;
