//! RetrievalEngine: question → embedding → top-k search → rank → compose.

use std::sync::Arc;
use std::time::Duration;

use kbase_core::config::{ComposeConfig, RetrievalConfig};
use kbase_core::errors::{EmbeddingError, KbaseError, KbaseResult};
use kbase_core::models::TierThresholds;
use kbase_core::traits::{IEmbeddingProvider, IVectorIndex};
use kbase_core::{Answer, KbaseConfig, MetadataFilter};
use tracing::{debug, info};

use crate::cache::AnswerCache;
use crate::compose::ResponseComposer;
use crate::ranking::Ranker;

/// The retrieval-augmented answering pipeline.
///
/// Stateless per question apart from the answer cache. Safe to share
/// across sessions behind an `Arc`.
pub struct RetrievalEngine {
    embedder: Arc<dyn IEmbeddingProvider>,
    index: Arc<dyn IVectorIndex>,
    ranker: Ranker,
    composer: ResponseComposer,
    config: RetrievalConfig,
    cache: AnswerCache,
}

impl RetrievalEngine {
    pub fn new(
        embedder: Arc<dyn IEmbeddingProvider>,
        index: Arc<dyn IVectorIndex>,
        retrieval: RetrievalConfig,
        compose: ComposeConfig,
    ) -> KbaseResult<Self> {
        if embedder.dimensions() != index.dimensions() {
            return Err(KbaseError::ConfigError {
                reason: format!(
                    "embedding provider '{}' produces {} dimensions but the index expects {}",
                    embedder.name(),
                    embedder.dimensions(),
                    index.dimensions()
                ),
            });
        }

        let thresholds = TierThresholds::new(retrieval.high_threshold, retrieval.medium_threshold);
        Ok(Self {
            ranker: Ranker::new(index.metric(), thresholds),
            composer: ResponseComposer::new(compose, thresholds),
            cache: AnswerCache::new(
                retrieval.answer_cache_size,
                Duration::from_secs(retrieval.answer_cache_ttl_secs),
            ),
            config: retrieval,
            embedder,
            index,
        })
    }

    /// Build from the full configuration.
    pub fn from_config(
        embedder: Arc<dyn IEmbeddingProvider>,
        index: Arc<dyn IVectorIndex>,
        config: &KbaseConfig,
    ) -> KbaseResult<Self> {
        Self::new(
            embedder,
            index,
            config.retrieval.clone(),
            config.compose.clone(),
        )
    }

    /// Answer a question over the whole index.
    ///
    /// Fails with `EmbeddingUnavailable` when the embedder is not ready and
    /// with a dimension mismatch if it returns a vector of the wrong size.
    /// An empty or irrelevant index is not an error.
    pub fn answer(&self, question: &str) -> KbaseResult<Answer> {
        self.run(question, None)
    }

    /// Answer a question restricted to documents matching `filter`.
    /// Filtered answers are never cached.
    pub fn answer_filtered(&self, question: &str, filter: &MetadataFilter) -> KbaseResult<Answer> {
        self.run(question, Some(filter))
    }

    pub fn index(&self) -> &Arc<dyn IVectorIndex> {
        &self.index
    }

    /// Number of cached answers.
    pub fn cached_answers(&self) -> u64 {
        self.cache.entry_count()
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    fn run(&self, question: &str, filter: Option<&MetadataFilter>) -> KbaseResult<Answer> {
        let question = question.trim();
        let span = kbase_observability::retrieval_span!(question);
        let _guard = span.enter();

        if question.is_empty() {
            return Ok(Answer::no_results());
        }

        let filter = filter.filter(|f| !f.is_empty());
        let generation = self.index.generation();
        if filter.is_none() {
            if let Some(hit) = self.cache.get(question, generation) {
                debug!("answer cache hit");
                return Ok(hit);
            }
        }

        if !self.embedder.is_available() {
            return Err(EmbeddingError::Unavailable {
                provider: self.embedder.name().to_string(),
            }
            .into());
        }
        let query = self.embedder.embed(question)?;

        let candidates = self.index.search(&query, self.config.top_k, filter)?;
        let found = candidates.len();
        let ranked = self.ranker.rank(candidates, self.config.min_confidence);
        let answer = self.composer.compose(question, &ranked);

        info!(
            candidates = found,
            ranked = ranked.len(),
            tier = %answer.confidence_tier,
            filtered = filter.is_some(),
            "question answered"
        );

        if filter.is_none() {
            self.cache.insert(question, answer.clone(), generation);
        }
        Ok(answer)
    }
}
