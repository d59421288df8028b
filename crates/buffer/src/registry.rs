//! Session registry
//!
//! Maps session ids to their history buffers, creating each buffer on first
//! use. The registry is an explicit object owned by the relay service;
//! identifiers always arrive as parameters, never from ambient state.
//!
//! Sessions are never torn down by callers, so long-lived processes would
//! otherwise accumulate one buffer per distinct id forever. `evict_idle`
//! drops sessions with no activity inside the given window; the relay's
//! maintenance task drives it periodically.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Mutex, RwLock};
use tracing::debug;

use crate::history::HistoryBuffer;
use crate::session::SessionId;

/// One registered session: its buffer plus activity tracking
#[derive(Debug)]
pub struct SessionEntry {
    buffer: HistoryBuffer,
    last_active: Mutex<Instant>,
}

impl SessionEntry {
    fn new(capacity: usize) -> Self {
        Self {
            buffer: HistoryBuffer::with_capacity(capacity),
            last_active: Mutex::new(Instant::now()),
        }
    }

    /// The session's history buffer
    pub fn buffer(&self) -> &HistoryBuffer {
        &self.buffer
    }

    /// Record activity (called on every ingest and read)
    pub fn touch(&self) {
        *self.last_active.lock() = Instant::now();
    }

    /// Time since the last ingest or read
    pub fn idle_for(&self) -> Duration {
        self.last_active.lock().elapsed()
    }
}

/// Registry of per-session history buffers
#[derive(Debug)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<SessionId, Arc<SessionEntry>>>,
    buffer_capacity: usize,
}

impl SessionRegistry {
    /// Create a registry whose buffers use the given capacity
    pub fn new(buffer_capacity: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            buffer_capacity,
        }
    }

    /// Get the session for an id, creating and registering it on first use
    pub fn get_or_create(&self, id: &SessionId) -> Arc<SessionEntry> {
        if let Some(entry) = self.get(id) {
            return entry;
        }

        let mut sessions = self.sessions.write();
        // A racing writer may have created it between the read and the write
        let entry = sessions
            .entry(id.clone())
            .or_insert_with(|| {
                debug!(session = %id, "registering new session");
                Arc::new(SessionEntry::new(self.buffer_capacity))
            });
        entry.touch();
        Arc::clone(entry)
    }

    /// Get an existing session, touching its activity timestamp
    pub fn get(&self, id: &SessionId) -> Option<Arc<SessionEntry>> {
        let sessions = self.sessions.read();
        let entry = sessions.get(id)?;
        entry.touch();
        Some(Arc::clone(entry))
    }

    /// Ids of all registered sessions
    pub fn session_ids(&self) -> Vec<SessionId> {
        let mut ids: Vec<_> = self.sessions.read().keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Number of registered sessions
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    /// True when no sessions are registered
    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }

    /// Drop sessions idle for longer than `max_idle`; returns how many
    pub fn evict_idle(&self, max_idle: Duration) -> usize {
        let mut sessions = self.sessions.write();
        let before = sessions.len();
        sessions.retain(|id, entry| {
            let keep = entry.idle_for() <= max_idle;
            if !keep {
                debug!(session = %id, "evicting idle session");
            }
            keep
        });
        before - sessions.len()
    }
}

#[cfg(test)]
#[path = "registry_test.rs"]
mod tests;
