//! Peek Server - ingestion and distribution
//!
//! `RelayService` owns the per-session history buffers and live subscriber
//! fan-out; the `http` module exposes it as an axum router (envelope
//! ingestion, SSE streaming, event lookup, history clearing, health).
//!
//! Fan-out is non-blocking: each subscriber has a bounded mpsc channel fed
//! with `try_send`, so a slow consumer loses containers instead of stalling
//! ingestion. A maintenance task sweeps disconnected subscribers and evicts
//! idle sessions.

mod error;
mod http;
mod relay;
mod subscriber;

pub use error::{ErrorResponse, Result, ServerError};
pub use http::{router, HandlerState, SESSION_HEADER};
pub use relay::{RelayConfig, RelayService};
pub use subscriber::{Subscriber, SubscriberManager, MAX_SUBSCRIBERS};
