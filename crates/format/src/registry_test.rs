//! Tests for family selection and dispatch

use super::*;
use crate::test_util::{header, json_item};
use bytes::Bytes;
use peek_protocol::{Item, ItemHeader, Payload};
use serde_json::json;

// ============================================================================
// Family names
// ============================================================================

#[test]
fn test_family_parse_aliases() {
    assert_eq!("human".parse::<FormatFamily>().unwrap(), FormatFamily::Human);
    assert_eq!("text".parse::<FormatFamily>().unwrap(), FormatFamily::Human);
    assert_eq!("logfmt".parse::<FormatFamily>().unwrap(), FormatFamily::Logfmt);
    assert_eq!("kv".parse::<FormatFamily>().unwrap(), FormatFamily::Logfmt);
    assert_eq!("JSON".parse::<FormatFamily>().unwrap(), FormatFamily::Json);
    assert_eq!("md".parse::<FormatFamily>().unwrap(), FormatFamily::Markdown);
}

#[test]
fn test_family_parse_unknown() {
    let err = "yaml".parse::<FormatFamily>().unwrap_err();
    assert_eq!(err, UnknownFormat("yaml".to_owned()));
    assert!(err.to_string().contains("yaml"));
}

#[test]
fn test_family_round_trip() {
    for family in FormatFamily::ALL {
        assert_eq!(family.as_str().parse::<FormatFamily>().unwrap(), family);
    }
}

// ============================================================================
// Registry
// ============================================================================

#[test]
fn test_registry_get_matches_family() {
    let registry = FormatterRegistry::new();
    for family in FormatFamily::ALL {
        assert_eq!(registry.get(family).family(), family);
    }
}

#[test]
fn test_registry_is_debug() {
    // Holders embed the registry in their own Debug output
    let rendered = format!("{:?}", FormatterRegistry::new());
    assert!(rendered.contains("FormatterRegistry"));
}

#[test]
fn test_registry_by_name() {
    let registry = FormatterRegistry::new();
    assert_eq!(
        registry.by_name("markdown").unwrap().family(),
        FormatFamily::Markdown
    );
    assert!(registry.by_name("nope").is_err());
}

// ============================================================================
// Dispatch
// ============================================================================

#[test]
fn test_render_item_unrecognized_kind_is_empty() {
    let registry = FormatterRegistry::new();
    let item = json_item("attachment", json!({"data": "..."}));
    for family in FormatFamily::ALL {
        let lines = render_item(registry.get(family), &item, &header(None));
        assert!(lines.is_empty(), "{family} rendered an unrecognized kind");
    }
}

#[test]
fn test_render_item_raw_payload_is_empty() {
    let registry = FormatterRegistry::new();
    let item = Item {
        header: ItemHeader {
            item_type: Some("event".into()),
            length: None,
        },
        payload: Payload::Raw(Bytes::from_static(b"\x00\x01")),
    };
    let lines = render_item(registry.get(FormatFamily::Human), &item, &header(None));
    assert!(lines.is_empty());
}

#[test]
fn test_render_container_in_item_order() {
    let wire = b"{\"event_id\":\"e1\"}\n\
                 {\"type\":\"event\"}\n\
                 {\"message\":\"boom\"}\n\
                 {\"type\":\"log\"}\n\
                 {\"items\":[{\"level\":\"info\",\"body\":\"started\"}]}\n";
    let container = peek_protocol::EventContainer::new(
        peek_protocol::ENVELOPE_CONTENT_TYPE,
        Bytes::from_static(wire),
    );

    let registry = FormatterRegistry::new();
    let lines = render_container(registry.get(FormatFamily::Human), &container);
    assert_eq!(lines, vec!["error [e1] boom", "log info started"]);
}
