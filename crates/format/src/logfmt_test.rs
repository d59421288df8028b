//! Tests for the logfmt formatter

use super::*;
use crate::test_util::{exception_item, header, json_item, log_item, transaction_item};
use crate::view::{ErrorView, LogView, TraceView};
use serde_json::json;

#[test]
fn test_logfmt_error_full() {
    let view = ErrorView::from_item(&exception_item(), &header(None)).unwrap();
    let lines = LogfmtFormatter.render_error(&view, &header(None));
    assert_eq!(
        lines,
        vec![
            "kind=error event_id=4c03 level=error exception=TypeError \
             message=\"x is not a function\" file=app.js line=42 function=onClick"
        ]
    );
}

#[test]
fn test_logfmt_absent_fields_emit_no_pairs() {
    let item = json_item("event", json!({"message": "boom"}));
    let view = ErrorView::from_item(&item, &header(None)).unwrap();
    let lines = LogfmtFormatter.render_error(&view, &header(None));
    assert_eq!(lines, vec!["kind=error message=boom"]);
}

#[test]
fn test_logfmt_quotes_embedded_quotes() {
    let item = json_item("event", json!({"message": "said \"no\""}));
    let view = ErrorView::from_item(&item, &header(None)).unwrap();
    let lines = LogfmtFormatter.render_error(&view, &header(None));
    assert_eq!(lines, vec!["kind=error message=\"said \\\"no\\\"\""]);
}

#[test]
fn test_logfmt_trace_full() {
    let view = TraceView::from_item(&transaction_item()).unwrap();
    let lines = LogfmtFormatter.render_trace(&view, &header(None));
    assert_eq!(
        lines,
        vec!["kind=trace name=checkout.submit duration_ms=182.4 status=cancelled spans=2 trace_id=t1"]
    );
}

#[test]
fn test_logfmt_log_attributes_prefixed() {
    let view = LogView::from_item(&log_item()).unwrap();
    let lines = LogfmtFormatter.render_log(&view, &header(None));
    assert_eq!(
        lines,
        vec![
            "kind=log level=info body=\"user logged in\" attr.user_id=12",
            "kind=log level=warning body=\"rate limit approaching\""
        ]
    );
}
