//! EmbeddingEngine: caching front for any provider.
//!
//! Implements `IEmbeddingProvider`, so it can be used anywhere a provider
//! is expected.

use std::sync::Arc;

use kbase_core::config::EmbeddingConfig;
use kbase_core::errors::{EmbeddingError, KbaseResult};
use kbase_core::traits::IEmbeddingProvider;
use tracing::{debug, info};

use crate::cache::{VectorCache, VectorKey};

/// Wraps a provider with a vector cache and output dimension validation.
pub struct EmbeddingEngine {
    provider: Box<dyn IEmbeddingProvider>,
    provider_name: Arc<str>,
    cache: VectorCache,
}

impl EmbeddingEngine {
    /// Cache sized and expired per `[embedding]`.
    pub fn from_config(provider: Box<dyn IEmbeddingProvider>, config: &EmbeddingConfig) -> Self {
        Self::with_cache(
            provider,
            VectorCache::new(config.l1_cache_size, config.l1_idle()),
        )
    }

    /// Cache of `l1_cache_size` entries with the default idle expiry.
    pub fn new(provider: Box<dyn IEmbeddingProvider>, l1_cache_size: u64) -> Self {
        let idle = EmbeddingConfig::default().l1_idle();
        Self::with_cache(provider, VectorCache::new(l1_cache_size, idle))
    }

    fn with_cache(provider: Box<dyn IEmbeddingProvider>, cache: VectorCache) -> Self {
        info!(
            provider = provider.name(),
            dims = provider.dimensions(),
            cached = cache.is_enabled(),
            "EmbeddingEngine initialized"
        );
        Self {
            provider_name: Arc::from(provider.name()),
            provider,
            cache,
        }
    }

    /// Drop every cached vector.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    fn validate(&self, embedding: &[f32]) -> KbaseResult<()> {
        let expected = self.provider.dimensions();
        if embedding.len() != expected {
            return Err(EmbeddingError::DimensionMismatch {
                expected,
                actual: embedding.len(),
            }
            .into());
        }
        Ok(())
    }
}

impl IEmbeddingProvider for EmbeddingEngine {
    fn embed(&self, text: &str) -> KbaseResult<Vec<f32>> {
        // Readiness is checked before the cache so a cold provider is
        // reported consistently.
        if !self.provider.is_available() {
            return Err(EmbeddingError::Unavailable {
                provider: self.provider.name().to_string(),
            }
            .into());
        }

        let key = VectorKey::new(Arc::clone(&self.provider_name), text);
        if let Some(vec) = self.cache.get(&key) {
            debug!(key = %key.short_hex(), "embedding cache hit");
            return Ok(vec);
        }

        let embedding = self.provider.embed(text)?;
        self.validate(&embedding)?;
        self.cache.insert(key, &embedding);
        Ok(embedding)
    }

    fn embed_batch(&self, texts: &[String]) -> KbaseResult<Vec<Vec<f32>>> {
        texts.iter().map(|t| self.embed(t)).collect()
    }

    fn dimensions(&self) -> usize {
        self.provider.dimensions()
    }

    fn name(&self) -> &str {
        self.provider.name()
    }

    fn is_available(&self) -> bool {
        self.provider.is_available()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HashingProvider;

    /// Returns vectors of the wrong length.
    struct ShortProvider;
    impl IEmbeddingProvider for ShortProvider {
        fn embed(&self, _text: &str) -> KbaseResult<Vec<f32>> {
            Ok(vec![1.0; 3])
        }
        fn embed_batch(&self, texts: &[String]) -> KbaseResult<Vec<Vec<f32>>> {
            Ok(texts.iter().map(|_| vec![1.0; 3]).collect())
        }
        fn dimensions(&self) -> usize {
            8
        }
        fn name(&self) -> &str {
            "short-mock"
        }
        fn is_available(&self) -> bool {
            true
        }
    }

    #[test]
    fn embed_returns_correct_dims() {
        let engine = EmbeddingEngine::new(Box::new(HashingProvider::new(64)), 100);
        assert_eq!(engine.embed("customer").unwrap().len(), 64);
    }

    #[test]
    fn cached_result_matches_fresh_result() {
        let engine = EmbeddingEngine::new(Box::new(HashingProvider::new(64)), 100);
        let first = engine.embed("order payment").unwrap();
        let second = engine.embed("order payment").unwrap();
        assert_eq!(first, second);
    }

    /// Counts calls so cache hits are observable.
    struct CountingProvider {
        calls: std::sync::atomic::AtomicUsize,
    }
    impl IEmbeddingProvider for CountingProvider {
        fn embed(&self, _text: &str) -> KbaseResult<Vec<f32>> {
            self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            Ok(vec![1.0; 4])
        }
        fn embed_batch(&self, texts: &[String]) -> KbaseResult<Vec<Vec<f32>>> {
            texts.iter().map(|t| self.embed(t)).collect()
        }
        fn dimensions(&self) -> usize {
            4
        }
        fn name(&self) -> &str {
            "counting"
        }
        fn is_available(&self) -> bool {
            true
        }
    }

    fn counting_engine(config: &EmbeddingConfig) -> (EmbeddingEngine, Arc<CountingProvider>) {
        let provider = Arc::new(CountingProvider {
            calls: Default::default(),
        });
        let engine = EmbeddingEngine::from_config(Box::new(Arc::clone(&provider)), config);
        (engine, provider)
    }

    #[test]
    fn repeated_text_is_served_from_cache() {
        let (engine, provider) = counting_engine(&EmbeddingConfig::default());
        engine.embed("customer").unwrap();
        engine.embed("customer").unwrap();
        engine.embed("order").unwrap();
        assert_eq!(provider.calls.load(std::sync::atomic::Ordering::SeqCst), 2);
    }

    #[test]
    fn zero_cache_size_always_calls_provider() {
        let config = EmbeddingConfig {
            l1_cache_size: 0,
            ..Default::default()
        };
        let (engine, provider) = counting_engine(&config);
        engine.embed("customer").unwrap();
        engine.embed("customer").unwrap();
        assert_eq!(provider.calls.load(std::sync::atomic::Ordering::SeqCst), 2);
    }

    #[test]
    fn clear_cache_forces_recompute() {
        let (engine, provider) = counting_engine(&EmbeddingConfig::default());
        engine.embed("customer").unwrap();
        engine.clear_cache();
        engine.embed("customer").unwrap();
        assert_eq!(provider.calls.load(std::sync::atomic::Ordering::SeqCst), 2);
    }

    #[test]
    fn wrong_dimension_output_is_rejected() {
        let engine = EmbeddingEngine::new(Box::new(ShortProvider), 100);
        let err = engine.embed("x").unwrap_err();
        assert!(err.to_string().contains("expected 8"));
    }
}
