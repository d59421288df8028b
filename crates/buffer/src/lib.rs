//! Peek Buffer - bounded per-session history
//!
//! - `HistoryBuffer` - fixed-capacity, insertion-ordered store of event
//!   containers with FIFO eviction and snapshot reads
//! - `SessionRegistry` - lazily-created buffer per session id, with idle
//!   eviction for long-lived processes
//! - `SessionId` - opaque, caller-supplied identifier (generated ids are
//!   ULIDs, so they sort by creation time)
//!
//! Buffers carry their own lock so the same effective serialization the
//! relay relies on holds on a multi-threaded runtime: a `read` reflects
//! every `put` that completed before it.

mod history;
mod registry;
mod session;

pub use history::HistoryBuffer;
pub use registry::{SessionEntry, SessionRegistry};
pub use session::SessionId;

/// Default history capacity per session
pub const DEFAULT_CAPACITY: usize = 100;

/// Capacity ceiling to keep a runaway config from eating the process
pub const MAX_CAPACITY: usize = 10_000;
