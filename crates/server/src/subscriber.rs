//! Subscriber management for live streams
//!
//! Each connected stream gets a `Subscriber` that tracks:
//! - Unique ID for the connection
//! - Channel sender for async container delivery
//!
//! The `SubscriberManager` handles registration, removal, and fan-out. One
//! manager exists per session; delivery is `try_send`, so a slow or
//! disconnected subscriber loses containers instead of stalling ingestion.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::mpsc;

use peek_protocol::EventContainer;

/// Counter for generating unique subscriber IDs
static SUBSCRIBER_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Maximum number of concurrent subscribers per session
pub const MAX_SUBSCRIBERS: usize = 100;

/// Channel buffer size for subscriber delivery
const CHANNEL_BUFFER_SIZE: usize = 256;

/// A single live subscriber (connected stream)
#[derive(Debug)]
pub struct Subscriber {
    /// Unique identifier
    id: u64,
    /// Channel sender for container delivery
    sender: mpsc::Sender<Arc<EventContainer>>,
}

impl Subscriber {
    fn new(sender: mpsc::Sender<Arc<EventContainer>>) -> Self {
        Self {
            id: SUBSCRIBER_ID_COUNTER.fetch_add(1, Ordering::Relaxed),
            sender,
        }
    }

    /// Get the subscriber ID
    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Try to send a container to this subscriber
    ///
    /// Returns false when the channel is full or closed
    #[inline]
    pub fn try_send(&self, container: Arc<EventContainer>) -> bool {
        self.sender.try_send(container).is_ok()
    }

    /// Check if this subscriber is still connected
    #[inline]
    pub fn is_connected(&self) -> bool {
        !self.sender.is_closed()
    }
}

/// Manages the active subscribers of one session
#[derive(Debug, Default)]
pub struct SubscriberManager {
    /// Active subscribers
    subscribers: RwLock<Vec<Arc<Subscriber>>>,
}

impl SubscriberManager {
    /// Create a new subscriber manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber
    ///
    /// Returns the subscriber ID and receiver channel, or `None` when the
    /// subscriber limit is reached.
    pub fn subscribe(&self) -> Option<(u64, mpsc::Receiver<Arc<EventContainer>>)> {
        let mut subscribers = self.subscribers.write();

        if subscribers.len() >= MAX_SUBSCRIBERS {
            return None;
        }

        let (sender, receiver) = mpsc::channel(CHANNEL_BUFFER_SIZE);
        let subscriber = Arc::new(Subscriber::new(sender));
        let id = subscriber.id();
        subscribers.push(subscriber);

        Some((id, receiver))
    }

    /// Unsubscribe by ID; returns whether the id was registered
    pub fn unsubscribe(&self, id: u64) -> bool {
        let mut subscribers = self.subscribers.write();
        let original_len = subscribers.len();
        subscribers.retain(|s| s.id() != id);
        subscribers.len() < original_len
    }

    /// Get number of active subscribers
    pub fn count(&self) -> usize {
        self.subscribers.read().len()
    }

    /// Check if there are any subscribers
    #[inline]
    pub fn has_subscribers(&self) -> bool {
        !self.subscribers.read().is_empty()
    }

    /// Broadcast a container to all subscribers
    ///
    /// Returns the number of subscribers that received it
    pub fn broadcast(&self, container: Arc<EventContainer>) -> usize {
        let subscribers = self.subscribers.read();
        let mut sent_count = 0;

        for subscriber in subscribers.iter() {
            if subscriber.try_send(Arc::clone(&container)) {
                sent_count += 1;
            }
        }

        sent_count
    }

    /// Clean up disconnected subscribers
    pub fn cleanup_disconnected(&self) -> usize {
        let mut subscribers = self.subscribers.write();
        let original_len = subscribers.len();
        subscribers.retain(|s| s.is_connected());
        original_len - subscribers.len()
    }
}

#[cfg(test)]
#[path = "subscriber_test.rs"]
mod tests;
