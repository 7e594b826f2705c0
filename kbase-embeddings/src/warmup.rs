//! Readiness gate for providers that need a warm-up period.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use kbase_core::errors::{EmbeddingError, KbaseResult};
use kbase_core::traits::IEmbeddingProvider;
use tracing::info;

/// Flips a [`WarmupGate`] open. Cheap to clone and share with a loader task.
#[derive(Debug, Clone)]
pub struct ReadinessHandle {
    ready: Arc<AtomicBool>,
}

impl ReadinessHandle {
    pub fn mark_ready(&self) {
        if !self.ready.swap(true, Ordering::AcqRel) {
            info!("embedding provider marked ready");
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }
}

/// Wraps a provider and refuses to embed until marked ready.
///
/// While closed, `is_available()` is false and every call fails with
/// `EmbeddingError::Unavailable` immediately instead of blocking.
pub struct WarmupGate {
    inner: Arc<dyn IEmbeddingProvider>,
    ready: Arc<AtomicBool>,
}

impl WarmupGate {
    /// Create a closed gate and the handle that opens it.
    pub fn new(inner: Arc<dyn IEmbeddingProvider>) -> (Self, ReadinessHandle) {
        let ready = Arc::new(AtomicBool::new(false));
        let handle = ReadinessHandle {
            ready: Arc::clone(&ready),
        };
        (Self { inner, ready }, handle)
    }

    fn check(&self) -> KbaseResult<()> {
        if self.ready.load(Ordering::Acquire) {
            Ok(())
        } else {
            Err(EmbeddingError::Unavailable {
                provider: format!("{} (warming up)", self.inner.name()),
            }
            .into())
        }
    }
}

impl IEmbeddingProvider for WarmupGate {
    fn embed(&self, text: &str) -> KbaseResult<Vec<f32>> {
        self.check()?;
        self.inner.embed(text)
    }

    fn embed_batch(&self, texts: &[String]) -> KbaseResult<Vec<Vec<f32>>> {
        self.check()?;
        self.inner.embed_batch(texts)
    }

    fn dimensions(&self) -> usize {
        self.inner.dimensions()
    }

    fn name(&self) -> &str {
        self.inner.name()
    }

    fn is_available(&self) -> bool {
        self.ready.load(Ordering::Acquire) && self.inner.is_available()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HashingProvider;

    #[test]
    fn closed_gate_reports_unavailable() {
        let (gate, handle) = WarmupGate::new(Arc::new(HashingProvider::new(16)));
        assert!(!gate.is_available());
        assert!(!handle.is_ready());
        let err = gate.embed("customer").unwrap_err();
        assert!(err.is_embedding_unavailable());
        assert!(gate.embed_batch(&["a".to_string()]).is_err());
    }

    #[test]
    fn open_gate_delegates() {
        let inner = Arc::new(HashingProvider::new(16));
        let (gate, handle) = WarmupGate::new(inner.clone());
        handle.mark_ready();
        assert!(gate.is_available());
        assert_eq!(gate.embed("customer").unwrap(), inner.embed("customer").unwrap());
        assert_eq!(gate.dimensions(), 16);
    }
}
