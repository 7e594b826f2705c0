//! SessionManager: spawns sessions and tracks them in a shared DashMap.

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use kbase_core::config::SessionConfig;
use kbase_retrieval::RetrievalEngine;

use crate::context::SessionContext;
use crate::session::{Session, SessionSummary};
use crate::transport::Transport;

/// Shared between the manager and every session it spawned. Sessions
/// remove themselves on close.
#[derive(Clone, Default)]
pub(crate) struct Registry {
    contexts: Arc<DashMap<String, SessionContext>>,
    closers: Arc<DashMap<String, watch::Sender<bool>>>,
    idle: Arc<Notify>,
}

impl Registry {
    fn register(&self, id: &str) -> watch::Receiver<bool> {
        let (tx, rx) = watch::channel(false);
        self.contexts
            .insert(id.to_string(), SessionContext::new(id.to_string()));
        self.closers.insert(id.to_string(), tx);
        rx
    }

    pub(crate) fn update(&self, id: &str, f: impl FnOnce(&mut SessionContext)) {
        if let Some(mut entry) = self.contexts.get_mut(id) {
            f(&mut entry);
        }
    }

    pub(crate) fn remove(&self, id: &str) {
        self.contexts.remove(id);
        self.closers.remove(id);
        if self.contexts.is_empty() {
            self.idle.notify_waiters();
        }
    }

    fn signal_close(&self, id: &str) -> bool {
        match self.closers.get(id) {
            Some(tx) => tx.send(true).is_ok(),
            None => false,
        }
    }
}

/// A spawned session.
pub struct SessionHandle {
    pub id: String,
    task: JoinHandle<SessionSummary>,
}

impl SessionHandle {
    /// Wait for the session to close. `None` if its task panicked.
    pub async fn finished(self) -> Option<SessionSummary> {
        self.task.await.ok()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Accepts transports and runs one session task per connection.
pub struct SessionManager {
    engine: Arc<RetrievalEngine>,
    config: SessionConfig,
    registry: Registry,
}

impl SessionManager {
    pub fn new(engine: Arc<RetrievalEngine>, config: SessionConfig) -> Self {
        Self {
            engine,
            config,
            registry: Registry::default(),
        }
    }

    /// Start a session on `transport`. Must be called inside a tokio runtime.
    pub fn accept<T: Transport>(&self, transport: T) -> SessionHandle {
        let id = uuid::Uuid::new_v4().to_string();
        let close_rx = self.registry.register(&id);
        let session = Session::new(
            id.clone(),
            transport,
            Arc::clone(&self.engine),
            self.config.clone(),
            self.registry.clone(),
            close_rx,
        );
        debug!(session_id = %id, "session accepted");
        SessionHandle {
            id,
            task: tokio::spawn(session.run()),
        }
    }

    /// Ask one session to close. Returns false if it is not live.
    pub fn close_session(&self, session_id: &str) -> bool {
        self.registry.signal_close(session_id)
    }

    /// Ask every live session to close. Returns how many were signalled.
    pub fn shutdown(&self) -> usize {
        let ids = self.session_ids();
        let signalled = ids
            .iter()
            .filter(|id| self.registry.signal_close(id))
            .count();
        info!(sessions = signalled, "shutting down sessions");
        signalled
    }

    /// Resolves once no sessions are live.
    pub async fn wait_idle(&self) {
        loop {
            let notified = self.registry.idle.notified();
            if self.registry.contexts.is_empty() {
                return;
            }
            notified.await;
        }
    }

    /// Snapshot of one session's context.
    pub fn get_session(&self, session_id: &str) -> Option<SessionContext> {
        self.registry.contexts.get(session_id).map(|r| r.clone())
    }

    /// Number of live sessions.
    pub fn session_count(&self) -> usize {
        self.registry.contexts.len()
    }

    pub fn session_ids(&self) -> Vec<String> {
        self.registry
            .contexts
            .iter()
            .map(|r| r.key().clone())
            .collect()
    }

    pub fn engine(&self) -> &Arc<RetrievalEngine> {
        &self.engine
    }
}
