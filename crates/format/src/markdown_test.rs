//! Tests for the markdown formatter

use super::*;
use crate::test_util::{exception_item, header, json_item, log_item, transaction_item};
use crate::view::{ErrorView, LogView, TraceView};
use serde_json::json;

#[test]
fn test_markdown_error_full() {
    let view = ErrorView::from_item(&exception_item(), &header(None)).unwrap();
    let lines = MarkdownFormatter.render_error(&view, &header(None));
    assert_eq!(
        lines,
        vec![
            "- **Error** `TypeError`: x is not a function - in `onClick` (`app.js:42`) [event `4c03`]"
        ]
    );
}

#[test]
fn test_markdown_error_message_only() {
    let item = json_item("event", json!({"message": "boom"}));
    let view = ErrorView::from_item(&item, &header(None)).unwrap();
    let lines = MarkdownFormatter.render_error(&view, &header(None));
    assert_eq!(lines, vec!["- **Error** boom"]);
}

#[test]
fn test_markdown_trace_full() {
    let view = TraceView::from_item(&transaction_item()).unwrap();
    let lines = MarkdownFormatter.render_trace(&view, &header(None));
    assert_eq!(
        lines,
        vec!["- **Trace** `checkout.submit` took 182.4ms across 2 spans (status: cancelled)"]
    );
}

#[test]
fn test_markdown_log_entries() {
    let view = LogView::from_item(&log_item()).unwrap();
    let lines = MarkdownFormatter.render_log(&view, &header(None));
    assert_eq!(
        lines,
        vec![
            "- **Log** _info_: user logged in",
            "- **Log** _warning_: rate limit approaching"
        ]
    );
}
