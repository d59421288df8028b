//! HTTP surface
//!
//! Axum routes over the relay service.
//!
//! # Endpoints
//!
//! - `POST /api/envelope` - ingest one envelope payload
//! - `GET /api/stream` - SSE live subscription, optionally replaying history
//! - `GET /api/event` - look up one buffered event by id
//! - `DELETE /api/history` - clear one session's buffer
//! - `GET /health` - health check
//!
//! Ingestion never rejects on payload shape. The session comes from the
//! `X-Peek-Session` header; when absent a fresh id is generated and returned
//! in the response so the sender can stick to it.

use std::convert::Infallible;
use std::io::Read;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use flate2::read::GzDecoder;
use futures::stream::{self, Stream, StreamExt};
use serde::Deserialize;
use tokio_stream::wrappers::ReceiverStream;

use peek_buffer::SessionId;
use peek_format::{render_item, FormatFamily, Formatter};
use peek_protocol::{EventContainer, EventKind, ENVELOPE_CONTENT_TYPE};

use crate::error::{Result, ServerError};
use crate::relay::RelayService;

/// Session header set by instrumented senders
pub const SESSION_HEADER: &str = "x-peek-session";

/// Shared state for handlers
pub struct HandlerState {
    pub relay: Arc<RelayService>,
    pub max_payload_size: usize,
}

/// Build the axum router
pub fn router(state: Arc<HandlerState>) -> Router {
    Router::new()
        .route("/api/envelope", post(ingest_envelope))
        .route("/api/stream", get(stream))
        .route("/api/event", get(lookup_event))
        .route("/api/history", delete(clear_history))
        .route("/health", get(health_check))
        .with_state(state)
}

/// POST /api/envelope - accept one envelope payload into a session
async fn ingest_envelope(
    State(state): State<Arc<HandlerState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse> {
    if body.len() > state.max_payload_size {
        return Err(ServerError::PayloadTooLarge {
            size: body.len(),
            limit: state.max_payload_size,
        });
    }

    let body = decode_content_encoding(&headers, body)?;

    let session = match header_str(&headers, SESSION_HEADER) {
        Some(id) => SessionId::new(id),
        None => SessionId::generate(),
    };

    let content_type = header_str(&headers, header::CONTENT_TYPE.as_str())
        .unwrap_or(ENVELOPE_CONTENT_TYPE)
        .to_owned();

    let container = state.relay.ingest(&session, &content_type, body);

    Ok(Json(serde_json::json!({
        "accepted": container.envelope().items.len(),
        "session": session.as_str(),
        "event_id": container.event_id(),
    })))
}

#[derive(Debug, Deserialize)]
struct StreamParams {
    session: Option<String>,
    format: Option<String>,
    replay: Option<usize>,
}

/// GET /api/stream - live SSE subscription on a session
///
/// Each ingested container becomes one SSE event per recognized item, named
/// after the item's kind so clients can filter without decoding. `replay=N`
/// pushes the last N buffered containers before going live.
async fn stream(
    State(state): State<Arc<HandlerState>>,
    Query(params): Query<StreamParams>,
) -> Result<Sse<impl Stream<Item = std::result::Result<Event, Infallible>>>> {
    let session = params
        .session
        .map(SessionId::new)
        .ok_or_else(|| ServerError::BadRequest("missing 'session' query parameter".into()))?;
    let family = parse_family(params.format.as_deref())?;

    let (_id, receiver) = state.relay.subscribe(&session)?;

    let replayed = state.relay.recent(&session, params.replay.unwrap_or(0));
    let relay = Arc::clone(&state.relay);
    let initial: Vec<_> = replayed
        .iter()
        .flat_map(|container| container_events(relay.formatters().get(family), container))
        .map(Ok)
        .collect();

    let live = ReceiverStream::new(receiver).flat_map(move |container| {
        let events = container_events(relay.formatters().get(family), &container);
        stream::iter(events.into_iter().map(Ok))
    });

    Ok(Sse::new(stream::iter(initial).chain(live)).keep_alive(KeepAlive::default()))
}

#[derive(Debug, Deserialize)]
struct LookupParams {
    id: Option<String>,
    session: Option<String>,
    format: Option<String>,
}

/// GET /api/event - look up one buffered event by envelope header id
async fn lookup_event(
    State(state): State<Arc<HandlerState>>,
    Query(params): Query<LookupParams>,
) -> Result<impl IntoResponse> {
    let id = params
        .id
        .ok_or_else(|| ServerError::BadRequest("missing 'id' query parameter".into()))?;
    let session = params
        .session
        .map(SessionId::new)
        .ok_or_else(|| ServerError::BadRequest("missing 'session' query parameter".into()))?;
    let family = parse_family(params.format.as_deref())?;

    let lines = state.relay.find_by_id(&session, &id, family)?;

    Ok(Json(serde_json::json!({
        "event_id": id,
        "session": session.as_str(),
        "lines": lines,
    })))
}

#[derive(Debug, Deserialize)]
struct ClearParams {
    session: Option<String>,
}

/// DELETE /api/history - clear one session's buffer
async fn clear_history(
    State(state): State<Arc<HandlerState>>,
    Query(params): Query<ClearParams>,
) -> Result<impl IntoResponse> {
    let session = params
        .session
        .map(SessionId::new)
        .ok_or_else(|| ServerError::BadRequest("missing 'session' query parameter".into()))?;

    let dropped = state.relay.clear_history(&session)?;
    Ok(Json(serde_json::json!({ "cleared": dropped })))
}

/// GET /health - health check endpoint
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({"status": "ok"})))
}

/// One SSE event per recognized item, named after the item's kind
fn container_events(formatter: &dyn Formatter, container: &EventContainer) -> Vec<Event> {
    let envelope = container.envelope();
    let mut events = Vec::new();

    for item in &envelope.items {
        let kind = item.kind();
        if kind == EventKind::Unrecognized {
            continue;
        }
        let lines = render_item(formatter, item, &envelope.header);
        if lines.is_empty() {
            continue;
        }
        events.push(Event::default().event(kind.as_str()).data(lines.join("\n")));
    }

    events
}

fn parse_family(name: Option<&str>) -> Result<FormatFamily> {
    Ok(name.unwrap_or("human").parse::<FormatFamily>()?)
}

/// Undo `Content-Encoding: gzip` before the payload reaches the decoder
fn decode_content_encoding(headers: &HeaderMap, body: Bytes) -> Result<Bytes> {
    let encoding = header_str(headers, header::CONTENT_ENCODING.as_str()).unwrap_or("");
    if !encoding.eq_ignore_ascii_case("gzip") {
        return Ok(body);
    }

    let mut decoded = Vec::new();
    GzDecoder::new(body.as_ref())
        .read_to_end(&mut decoded)
        .map_err(|e| ServerError::BadRequest(format!("invalid gzip body: {e}")))?;
    Ok(Bytes::from(decoded))
}

fn header_str<'h>(headers: &'h HeaderMap, name: &str) -> Option<&'h str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;
