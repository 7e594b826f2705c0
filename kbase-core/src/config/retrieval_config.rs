use serde::{Deserialize, Serialize};

use super::defaults;

/// Retrieval subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Number of candidates requested from the index.
    pub top_k: usize,
    /// Results below this confidence are dropped by the ranker.
    pub min_confidence: f64,
    /// Inclusive lower bound of the `high` tier.
    pub high_threshold: f64,
    /// Inclusive lower bound of the `medium` tier.
    pub medium_threshold: f64,
    /// Max cached answers. Zero disables the cache.
    pub answer_cache_size: u64,
    /// Time-to-live of a cached answer in seconds.
    pub answer_cache_ttl_secs: u64,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: defaults::DEFAULT_TOP_K,
            min_confidence: defaults::DEFAULT_MIN_CONFIDENCE,
            high_threshold: defaults::DEFAULT_HIGH_THRESHOLD,
            medium_threshold: defaults::DEFAULT_MEDIUM_THRESHOLD,
            answer_cache_size: defaults::DEFAULT_ANSWER_CACHE_SIZE,
            answer_cache_ttl_secs: defaults::DEFAULT_ANSWER_CACHE_TTL_SECS,
        }
    }
}
