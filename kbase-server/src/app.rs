//! Component wiring and the accept loop.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use kbase_core::traits::IEmbeddingProvider;
use kbase_core::{DistanceMetric, KbaseConfig};
use kbase_embeddings::{create_provider, EmbeddingEngine, ReadinessHandle, WarmupGate};
use kbase_index::InMemoryIndex;
use kbase_loader::{load_model, KnowledgeModel, LoadReport};
use kbase_retrieval::RetrievalEngine;
use kbase_session::{LineTransport, SessionManager};

/// How long shutdown waits for sessions to finish closing.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// A configured assistant: index, embedder, engine, and session manager.
pub struct App {
    config: KbaseConfig,
    index: Arc<InMemoryIndex>,
    /// Cached embedder without the readiness gate; used for loading.
    loader_embedder: Arc<dyn IEmbeddingProvider>,
    readiness: ReadinessHandle,
    manager: Arc<SessionManager>,
}

impl App {
    /// Build every component. Questions are answered with a warming-up
    /// message until [`App::mark_ready`] (or the warm-up task) opens the gate.
    pub fn build(config: KbaseConfig) -> Result<Self> {
        let metric = DistanceMetric::parse(&config.index.metric)
            .with_context(|| format!("unknown index.metric '{}'", config.index.metric))?;
        let index = Arc::new(InMemoryIndex::new(config.index.dimensions, metric));

        let provider = create_provider(&config.embedding);
        let cached: Arc<dyn IEmbeddingProvider> = Arc::new(EmbeddingEngine::from_config(
            Box::new(provider),
            &config.embedding,
        ));
        let (gate, readiness) = WarmupGate::new(Arc::clone(&cached));

        let engine = RetrievalEngine::from_config(Arc::new(gate), index.clone(), &config)
            .context("failed to build retrieval engine")?;
        let manager = Arc::new(SessionManager::new(
            Arc::new(engine),
            config.session.clone(),
        ));

        Ok(Self {
            config,
            index,
            loader_embedder: cached,
            readiness,
            manager,
        })
    }

    pub fn config(&self) -> &KbaseConfig {
        &self.config
    }

    pub fn index(&self) -> &Arc<InMemoryIndex> {
        &self.index
    }

    pub fn manager(&self) -> &Arc<SessionManager> {
        &self.manager
    }

    pub fn is_ready(&self) -> bool {
        self.readiness.is_ready()
    }

    pub fn mark_ready(&self) {
        self.readiness.mark_ready();
    }

    /// Parse and load one knowledge model file into the index.
    pub fn load_knowledge(&self, path: &str) -> Result<LoadReport> {
        let model = KnowledgeModel::from_file(path)
            .with_context(|| format!("failed to read knowledge model {path}"))?;
        let report = load_model(self.index.as_ref(), self.loader_embedder.as_ref(), &model)
            .with_context(|| format!("failed to load knowledge model {path}"))?;
        Ok(report)
    }

    /// Load the configured knowledge model on the blocking pool, then open
    /// the gate. A failed load is logged and the gate opens anyway, so
    /// sessions get answers from whatever was indexed.
    pub fn spawn_warmup(self: &Arc<Self>) -> JoinHandle<()> {
        let app = Arc::clone(self);
        tokio::task::spawn_blocking(move || {
            if let Some(path) = app.config.server.knowledge_path.clone() {
                match app.load_knowledge(&path) {
                    Ok(report) => info!(
                        path = %path,
                        documents = report.total,
                        "knowledge model ready"
                    ),
                    Err(err) => error!(path = %path, error = ?err, "knowledge load failed"),
                }
            } else {
                warn!("no knowledge model configured, serving an empty index");
            }
            app.mark_ready();
        })
    }

    /// Accept connections until `shutdown` resolves, then close every
    /// session and wait (bounded) for them to finish.
    pub async fn serve(&self, listener: TcpListener, shutdown: impl Future<Output = ()>) {
        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                accepted = listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        let handle = self.manager.accept(LineTransport::from_tcp(stream));
                        debug!(peer = %peer, session_id = %handle.id, "connection accepted");
                    }
                    Err(err) => warn!(error = %err, "accept failed"),
                },
            }
        }

        let signalled = self.manager.shutdown();
        if tokio::time::timeout(DRAIN_TIMEOUT, self.manager.wait_idle())
            .await
            .is_err()
        {
            warn!(
                remaining = self.manager.session_count(),
                "sessions still open after drain timeout"
            );
        }
        info!(sessions = signalled, "server stopped");
    }
}
