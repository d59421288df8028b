//! Tests for view extraction

use super::*;
use crate::test_util::{exception_item, header, json_item, log_item, transaction_item};
use bytes::Bytes;
use peek_protocol::{Item, ItemHeader, Payload};
use serde_json::json;

// ============================================================================
// Error views
// ============================================================================

#[test]
fn test_error_view_full_exception() {
    let view = ErrorView::from_item(&exception_item(), &header(None)).unwrap();

    assert_eq!(view.event_id.as_deref(), Some("4c03"));
    assert_eq!(view.level.as_deref(), Some("error"));
    assert_eq!(view.exception_type.as_deref(), Some("TypeError"));
    assert_eq!(view.message.as_deref(), Some("x is not a function"));

    let frame = view.frame.unwrap();
    assert_eq!(frame.file.as_deref(), Some("app.js"));
    assert_eq!(frame.line, Some(42));
    assert_eq!(frame.function.as_deref(), Some("onClick"));
    assert!(frame.in_app);
}

#[test]
fn test_error_view_falls_back_to_envelope_event_id() {
    let item = json_item("event", json!({"message": "plain"}));
    let view = ErrorView::from_item(&item, &header(Some("hdr-id"))).unwrap();
    assert_eq!(view.event_id.as_deref(), Some("hdr-id"));
    assert_eq!(view.message.as_deref(), Some("plain"));
}

#[test]
fn test_error_view_formatted_message_object() {
    let item = json_item("event", json!({"message": {"formatted": "built %s"}}));
    let view = ErrorView::from_item(&item, &header(None)).unwrap();
    assert_eq!(view.message.as_deref(), Some("built %s"));
}

#[test]
fn test_error_view_no_in_app_frame_uses_last() {
    let item = json_item(
        "event",
        json!({
            "exception": {"values": [{
                "type": "Error",
                "stacktrace": {"frames": [
                    {"filename": "a.js", "lineno": 1},
                    {"filename": "b.js", "lineno": 2}
                ]}
            }]}
        }),
    );
    let frame = ErrorView::from_item(&item, &header(None))
        .unwrap()
        .frame
        .unwrap();
    assert_eq!(frame.file.as_deref(), Some("b.js"));
    assert_eq!(frame.line, Some(2));
}

#[test]
fn test_error_view_missing_fields_are_none() {
    let item = json_item("event", json!({"exception": {"values": [{}]}}));
    let view = ErrorView::from_item(&item, &header(None)).unwrap();
    assert!(view.exception_type.is_none());
    assert!(view.message.is_none());
    assert!(view.frame.is_none());
}

#[test]
fn test_error_view_raw_payload_is_none() {
    let item = Item {
        header: ItemHeader {
            item_type: Some("event".into()),
            length: None,
        },
        payload: Payload::Raw(Bytes::from_static(b"junk")),
    };
    assert!(ErrorView::from_item(&item, &header(None)).is_none());
}

// ============================================================================
// Trace views
// ============================================================================

#[test]
fn test_trace_view_full() {
    let view = TraceView::from_item(&transaction_item()).unwrap();

    assert_eq!(view.name.as_deref(), Some("checkout.submit"));
    let duration = view.duration_ms.unwrap();
    assert!((duration - 182.4).abs() < 0.1, "duration was {duration}");
    assert_eq!(view.status.as_deref(), Some("cancelled"));
    assert_eq!(view.span_count, Some(2));
    assert_eq!(view.trace_id.as_deref(), Some("t1"));
}

#[test]
fn test_trace_view_default_status_omitted() {
    let item = json_item(
        "transaction",
        json!({"transaction": "t", "contexts": {"trace": {"status": "ok"}}}),
    );
    let view = TraceView::from_item(&item).unwrap();
    assert!(view.status.is_none());
}

#[test]
fn test_trace_view_missing_timestamps_no_duration() {
    let item = json_item("transaction", json!({"transaction": "t"}));
    let view = TraceView::from_item(&item).unwrap();
    assert!(view.duration_ms.is_none());
    assert!(view.span_count.is_none());
}

// ============================================================================
// Log views
// ============================================================================

#[test]
fn test_log_view_one_entry_per_item() {
    let view = LogView::from_item(&log_item()).unwrap();
    assert_eq!(view.entries.len(), 2);

    assert_eq!(view.entries[0].level.as_deref(), Some("info"));
    assert_eq!(view.entries[0].body.as_deref(), Some("user logged in"));
    // Typed attribute wrappers are unwrapped to plain values
    assert_eq!(view.entries[0].attributes.get("user_id"), Some(&json!(12)));

    assert_eq!(view.entries[1].level.as_deref(), Some("warning"));
}

#[test]
fn test_log_view_without_items_is_none() {
    let item = json_item("log", json!({"body": "floating"}));
    assert!(LogView::from_item(&item).is_none());
}

#[test]
fn test_log_view_empty_items() {
    let item = json_item("log", json!({"items": []}));
    let view = LogView::from_item(&item).unwrap();
    assert!(view.entries.is_empty());
}
