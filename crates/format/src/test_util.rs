//! Shared builders for formatter tests

use serde_json::{json, Map, Value};

use peek_protocol::{EnvelopeHeader, Item, ItemHeader, Payload};

/// Item with a decoded JSON payload
pub fn json_item(item_type: &str, payload: Value) -> Item {
    Item {
        header: ItemHeader {
            item_type: Some(item_type.to_owned()),
            length: None,
        },
        payload: Payload::Json(payload),
    }
}

/// Envelope header with an optional event id
pub fn header(event_id: Option<&str>) -> EnvelopeHeader {
    let mut fields = Map::new();
    if let Some(id) = event_id {
        fields.insert("event_id".into(), Value::String(id.to_owned()));
    }
    EnvelopeHeader::new(fields)
}

/// A full error event item: exception with a two-frame stacktrace, the
/// second frame flagged in-app
pub fn exception_item() -> Item {
    json_item(
        "event",
        json!({
            "event_id": "4c03",
            "level": "error",
            "exception": {
                "values": [{
                    "type": "TypeError",
                    "value": "x is not a function",
                    "stacktrace": {
                        "frames": [
                            {"filename": "vendor.js", "lineno": 9000, "function": "dispatch", "in_app": false},
                            {"filename": "app.js", "lineno": 42, "function": "onClick", "in_app": true}
                        ]
                    }
                }]
            }
        }),
    )
}

/// A transaction item with two spans and a non-default status
pub fn transaction_item() -> Item {
    json_item(
        "transaction",
        json!({
            "transaction": "checkout.submit",
            "start_timestamp": 1700000000.0,
            "timestamp": 1700000000.1824,
            "contexts": {
                "trace": {"trace_id": "t1", "status": "cancelled", "op": "http.server"}
            },
            "spans": [{"op": "db"}, {"op": "cache"}]
        }),
    )
}

/// A log item with two entries
pub fn log_item() -> Item {
    json_item(
        "log",
        json!({
            "items": [
                {"level": "info", "body": "user logged in", "attributes": {"user_id": {"value": 12, "type": "integer"}}},
                {"level": "warning", "body": "rate limit approaching"}
            ]
        }),
    )
}
