//! Tests for the JSON formatter

use super::*;
use crate::test_util::{exception_item, header, json_item, log_item, transaction_item};
use crate::view::{ErrorView, LogView, TraceView};
use serde_json::{json, Value};

fn parse(line: &str) -> Value {
    serde_json::from_str(line).unwrap()
}

#[test]
fn test_json_error_full() {
    let view = ErrorView::from_item(&exception_item(), &header(None)).unwrap();
    let lines = JsonFormatter.render_error(&view, &header(None));
    assert_eq!(lines.len(), 1);

    let obj = parse(&lines[0]);
    assert_eq!(obj["kind"], json!("error"));
    assert_eq!(obj["event_id"], json!("4c03"));
    assert_eq!(obj["level"], json!("error"));
    assert_eq!(obj["exception"], json!("TypeError"));
    assert_eq!(obj["message"], json!("x is not a function"));
    assert_eq!(obj["file"], json!("app.js"));
    assert_eq!(obj["line"], json!(42));
    assert_eq!(obj["function"], json!("onClick"));
}

#[test]
fn test_json_absent_fields_omitted() {
    let item = json_item("event", json!({"message": "boom"}));
    let view = ErrorView::from_item(&item, &header(None)).unwrap();
    let lines = JsonFormatter.render_error(&view, &header(None));

    let obj = parse(&lines[0]);
    let fields = obj.as_object().unwrap();
    assert_eq!(fields.len(), 2);
    assert_eq!(obj["kind"], json!("error"));
    assert_eq!(obj["message"], json!("boom"));
    assert!(!fields.contains_key("event_id"));
    assert!(!fields.contains_key("exception"));
}

#[test]
fn test_json_trace_full() {
    let view = TraceView::from_item(&transaction_item()).unwrap();
    let lines = JsonFormatter.render_trace(&view, &header(None));

    let obj = parse(&lines[0]);
    assert_eq!(obj["kind"], json!("trace"));
    assert_eq!(obj["name"], json!("checkout.submit"));
    assert_eq!(obj["duration_ms"], json!(182.4));
    assert_eq!(obj["status"], json!("cancelled"));
    assert_eq!(obj["spans"], json!(2));
    assert_eq!(obj["trace_id"], json!("t1"));
}

#[test]
fn test_json_log_entries_and_attributes() {
    let view = LogView::from_item(&log_item()).unwrap();
    let lines = JsonFormatter.render_log(&view, &header(None));
    assert_eq!(lines.len(), 2);

    let first = parse(&lines[0]);
    assert_eq!(first["kind"], json!("log"));
    assert_eq!(first["level"], json!("info"));
    assert_eq!(first["body"], json!("user logged in"));
    assert_eq!(first["attributes"], json!({"user_id": 12}));

    let second = parse(&lines[1]);
    assert_eq!(second["level"], json!("warning"));
    assert!(!second.as_object().unwrap().contains_key("attributes"));
}
