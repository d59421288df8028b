//! Relay service
//!
//! The core ingest/read path shared by the HTTP surface, the stream
//! endpoint, and the tool facade:
//!
//! - `ingest` wraps raw bytes in an `Arc<EventContainer>`, appends it to the
//!   session's history (creating the session lazily), and fans it out to the
//!   session's live subscribers without blocking
//! - `read_history` / `find_by_id` render buffered containers through a
//!   formatter family
//! - `clear_history` empties one session's buffer only
//!
//! A maintenance task periodically sweeps disconnected subscribers and
//! evicts idle sessions.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use parking_lot::RwLock;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use peek_buffer::{SessionId, SessionRegistry, DEFAULT_CAPACITY};
use peek_format::{render_container, FormatFamily, FormatterRegistry};
use peek_protocol::EventContainer;

use crate::error::{Result, ServerError};
use crate::subscriber::{SubscriberManager, MAX_SUBSCRIBERS};

/// Relay tuning knobs
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// History capacity per session
    pub buffer_capacity: usize,
    /// Whether idle sessions are evicted at all
    pub evict_idle_sessions: bool,
    /// Idle window after which a session is dropped
    pub session_max_idle: Duration,
    /// How often the maintenance task runs
    pub sweep_interval: Duration,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: DEFAULT_CAPACITY,
            evict_idle_sessions: true,
            session_max_idle: Duration::from_secs(3600),
            sweep_interval: Duration::from_secs(60),
        }
    }
}

/// Ingestion and distribution service
#[derive(Debug)]
pub struct RelayService {
    registry: SessionRegistry,
    subscribers: RwLock<HashMap<SessionId, Arc<SubscriberManager>>>,
    formatters: FormatterRegistry,
    config: RelayConfig,
}

impl RelayService {
    /// Create a relay with the given configuration
    pub fn new(config: RelayConfig) -> Self {
        Self {
            registry: SessionRegistry::new(config.buffer_capacity),
            subscribers: RwLock::new(HashMap::new()),
            formatters: FormatterRegistry::new(),
            config,
        }
    }

    /// The formatter registry used by the read path
    pub fn formatters(&self) -> &FormatterRegistry {
        &self.formatters
    }

    /// Accept a raw payload into a session
    ///
    /// The payload is never validated here; decoding happens lazily on first
    /// read. Live subscribers of the session receive the container via
    /// `try_send`, so a full channel drops it for that subscriber only.
    pub fn ingest(
        &self,
        session: &SessionId,
        content_type: &str,
        data: Bytes,
    ) -> Arc<EventContainer> {
        let container = Arc::new(EventContainer::new(content_type, data));

        let entry = self.registry.get_or_create(session);
        entry.buffer().put(Arc::clone(&container));

        let delivered = match self.manager(session) {
            Some(manager) => manager.broadcast(Arc::clone(&container)),
            None => 0,
        };

        debug!(
            session = %session,
            bytes = container.data().len(),
            delivered,
            "ingested container"
        );

        container
    }

    /// Register a live subscriber on a session
    ///
    /// The session is created lazily so a stream can be opened before the
    /// first ingest. Only containers ingested after this call are delivered;
    /// missed history is re-read, not replayed.
    pub fn subscribe(
        &self,
        session: &SessionId,
    ) -> Result<(u64, mpsc::Receiver<Arc<EventContainer>>)> {
        self.registry.get_or_create(session);

        let manager = self.manager_or_create(session);
        manager
            .subscribe()
            .ok_or_else(|| ServerError::MaxSubscribers {
                session: session.to_string(),
                max: MAX_SUBSCRIBERS,
            })
    }

    /// Remove a subscriber registered with [`subscribe`](Self::subscribe)
    pub fn unsubscribe(&self, session: &SessionId, id: u64) {
        if let Some(manager) = self.manager(session) {
            manager.unsubscribe(id);
        }
    }

    /// Number of live subscribers on a session
    pub fn subscriber_count(&self, session: &SessionId) -> usize {
        self.manager(session).map_or(0, |m| m.count())
    }

    /// Buffered history of a session, rendered most-recent-first
    pub fn read_history(&self, session: &SessionId, family: FormatFamily) -> Result<Vec<String>> {
        let entry = self
            .registry
            .get(session)
            .ok_or_else(|| ServerError::SessionNotFound(session.to_string()))?;

        let formatter = self.formatters.get(family);
        let lines = entry
            .buffer()
            .read()
            .iter()
            .flat_map(|container| render_container(formatter, container))
            .collect();
        Ok(lines)
    }

    /// The last `n` buffered containers of a session, oldest first
    ///
    /// Best-effort: an unknown session yields an empty list.
    pub fn recent(&self, session: &SessionId, n: usize) -> Vec<Arc<EventContainer>> {
        let Some(entry) = self.registry.get(session) else {
            return Vec::new();
        };
        let all = entry.buffer().all();
        let skip = all.len().saturating_sub(n);
        all.into_iter().skip(skip).collect()
    }

    /// Find one buffered event by envelope header id, rendered
    ///
    /// Scans oldest-first so the earliest matching container wins when ids
    /// repeat.
    pub fn find_by_id(
        &self,
        session: &SessionId,
        event_id: &str,
        family: FormatFamily,
    ) -> Result<Vec<String>> {
        let entry = self
            .registry
            .get(session)
            .ok_or_else(|| ServerError::SessionNotFound(session.to_string()))?;

        let formatter = self.formatters.get(family);
        entry
            .buffer()
            .all()
            .iter()
            .find(|container| container.event_id() == Some(event_id))
            .map(|container| render_container(formatter, container))
            .ok_or_else(|| ServerError::LookupMiss {
                session: session.to_string(),
                id: event_id.to_owned(),
            })
    }

    /// Empty one session's buffer; returns how many containers were dropped
    pub fn clear_history(&self, session: &SessionId) -> Result<usize> {
        let entry = self
            .registry
            .get(session)
            .ok_or_else(|| ServerError::SessionNotFound(session.to_string()))?;

        let dropped = entry.buffer().len();
        entry.buffer().clear();
        info!(session = %session, dropped, "cleared session history");
        Ok(dropped)
    }

    /// Ids of all known sessions, sorted
    pub fn sessions(&self) -> Vec<SessionId> {
        self.registry.session_ids()
    }

    /// One maintenance pass: sweep dead subscribers and idle sessions
    pub fn sweep(&self) {
        let mut managers = self.subscribers.write();
        let mut swept = 0;
        for manager in managers.values() {
            swept += manager.cleanup_disconnected();
        }
        // Drop fan-out state for sessions nobody is listening to
        managers.retain(|_, manager| manager.has_subscribers());
        drop(managers);

        let evicted = if self.config.evict_idle_sessions {
            self.registry.evict_idle(self.config.session_max_idle)
        } else {
            0
        };

        if swept > 0 || evicted > 0 {
            debug!(
                swept_subscribers = swept,
                evicted_sessions = evicted,
                "maintenance sweep"
            );
        }
    }

    /// Run periodic maintenance until cancelled
    pub fn spawn_maintenance(self: &Arc<Self>, cancel: CancellationToken) -> JoinHandle<()> {
        let relay = Arc::clone(self);

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(relay.config.sweep_interval);
            loop {
                tokio::select! {
                    _ = interval.tick() => relay.sweep(),
                    _ = cancel.cancelled() => {
                        debug!("maintenance task stopping");
                        break;
                    }
                }
            }
        })
    }

    fn manager(&self, session: &SessionId) -> Option<Arc<SubscriberManager>> {
        self.subscribers.read().get(session).map(Arc::clone)
    }

    fn manager_or_create(&self, session: &SessionId) -> Arc<SubscriberManager> {
        if let Some(manager) = self.manager(session) {
            return manager;
        }

        let mut managers = self.subscribers.write();
        let manager = managers
            .entry(session.clone())
            .or_insert_with(|| Arc::new(SubscriberManager::new()));
        Arc::clone(manager)
    }
}

impl Default for RelayService {
    fn default() -> Self {
        Self::new(RelayConfig::default())
    }
}

#[cfg(test)]
#[path = "relay_test.rs"]
mod tests;
