//! Tests for the session registry

use super::*;
use bytes::Bytes;
use peek_protocol::{EventContainer, ENVELOPE_CONTENT_TYPE};

fn make_container(id: &str) -> Arc<EventContainer> {
    let data = format!("{{\"event_id\":\"{}\"}}\n", id);
    Arc::new(EventContainer::new(
        ENVELOPE_CONTENT_TYPE,
        Bytes::from(data),
    ))
}

// ============================================================================
// Lazy creation
// ============================================================================

#[test]
fn test_get_or_create_registers_on_first_use() {
    let registry = SessionRegistry::new(10);
    assert!(registry.is_empty());

    let id = SessionId::new("s1");
    let entry = registry.get_or_create(&id);
    assert_eq!(registry.len(), 1);
    assert!(entry.buffer().is_empty());
}

#[test]
fn test_get_or_create_returns_existing_buffer() {
    let registry = SessionRegistry::new(10);
    let id = SessionId::new("s1");

    registry.get_or_create(&id).buffer().put(make_container("a"));
    let entry = registry.get_or_create(&id);
    assert_eq!(entry.buffer().len(), 1);
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_get_unknown_session_is_none() {
    let registry = SessionRegistry::new(10);
    assert!(registry.get(&SessionId::new("missing")).is_none());
}

#[test]
fn test_buffers_use_configured_capacity() {
    let registry = SessionRegistry::new(3);
    let entry = registry.get_or_create(&SessionId::new("s"));
    assert_eq!(entry.buffer().capacity(), 3);
}

// ============================================================================
// Session isolation
// ============================================================================

#[test]
fn test_sessions_are_isolated() {
    let registry = SessionRegistry::new(10);
    let a = SessionId::new("a");
    let b = SessionId::new("b");

    registry.get_or_create(&a).buffer().put(make_container("1"));
    registry.get_or_create(&b).buffer().put(make_container("2"));

    // Clearing A leaves B untouched
    registry.get(&a).unwrap().buffer().clear();
    assert!(registry.get(&a).unwrap().buffer().is_empty());
    assert_eq!(registry.get(&b).unwrap().buffer().len(), 1);
}

#[test]
fn test_session_ids_sorted() {
    let registry = SessionRegistry::new(10);
    for name in ["charlie", "alpha", "bravo"] {
        registry.get_or_create(&SessionId::new(name));
    }
    let ids: Vec<_> = registry
        .session_ids()
        .into_iter()
        .map(|id| id.as_str().to_owned())
        .collect();
    assert_eq!(ids, vec!["alpha", "bravo", "charlie"]);
}

// ============================================================================
// Idle eviction
// ============================================================================

#[test]
fn test_evict_idle_drops_stale_sessions() {
    let registry = SessionRegistry::new(10);
    registry.get_or_create(&SessionId::new("stale"));

    std::thread::sleep(Duration::from_millis(20));
    registry.get_or_create(&SessionId::new("fresh"));

    let evicted = registry.evict_idle(Duration::from_millis(10));
    assert_eq!(evicted, 1);
    assert!(registry.get(&SessionId::new("stale")).is_none());
    assert!(registry.get(&SessionId::new("fresh")).is_some());
}

#[test]
fn test_activity_resets_idle_clock() {
    let registry = SessionRegistry::new(10);
    let id = SessionId::new("busy");
    registry.get_or_create(&id);

    std::thread::sleep(Duration::from_millis(20));
    // A read counts as activity
    registry.get(&id).unwrap();

    let evicted = registry.evict_idle(Duration::from_millis(15));
    assert_eq!(evicted, 0);
}

#[test]
fn test_evict_idle_on_empty_registry() {
    let registry = SessionRegistry::new(10);
    assert_eq!(registry.evict_idle(Duration::from_secs(0)), 0);
}
