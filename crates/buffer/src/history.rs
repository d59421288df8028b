//! Bounded history buffer
//!
//! Fixed-capacity, insertion-ordered store with FIFO eviction: when a put
//! would exceed capacity the oldest entry is evicted first. Reads return a
//! point-in-time snapshot and never observe a write in progress.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::RwLock;

use peek_protocol::EventContainer;

use crate::{DEFAULT_CAPACITY, MAX_CAPACITY};

/// Fixed-capacity FIFO store of event containers
#[derive(Debug)]
pub struct HistoryBuffer {
    inner: RwLock<VecDeque<Arc<EventContainer>>>,
    capacity: usize,
}

impl HistoryBuffer {
    /// Create a buffer with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a buffer with the given capacity (clamped to `MAX_CAPACITY`,
    /// floor of 1)
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.clamp(1, MAX_CAPACITY);
        Self {
            inner: RwLock::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    /// Append a container, evicting the oldest entry first when at capacity
    pub fn put(&self, container: Arc<EventContainer>) {
        let mut inner = self.inner.write();
        if inner.len() == self.capacity {
            inner.pop_front();
        }
        inner.push_back(container);
    }

    /// Snapshot of current contents, most-recently-inserted first
    pub fn read(&self) -> Vec<Arc<EventContainer>> {
        self.inner.read().iter().rev().cloned().collect()
    }

    /// Snapshot of current contents, oldest first (for linear scans)
    pub fn all(&self) -> Vec<Arc<EventContainer>> {
        self.inner.read().iter().cloned().collect()
    }

    /// Empty the buffer
    pub fn clear(&self) {
        self.inner.write().clear();
    }

    /// Current number of entries
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// True when the buffer holds no entries
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Configured capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "history_test.rs"]
mod tests;
