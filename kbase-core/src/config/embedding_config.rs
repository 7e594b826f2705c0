use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Embedding subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Embedding provider. Only "hashing" ships in-tree.
    pub provider: String,
    /// Output dimensions. Must match `index.dimensions`.
    pub dimensions: usize,
    /// L1 in-memory cache max entries.
    pub l1_cache_size: u64,
    /// Seconds a cached vector may go unread before it expires. 0 keeps
    /// entries until evicted by size.
    pub l1_idle_secs: u64,
}

impl EmbeddingConfig {
    pub fn l1_idle(&self) -> Option<Duration> {
        (self.l1_idle_secs > 0).then(|| Duration::from_secs(self.l1_idle_secs))
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: defaults::DEFAULT_EMBEDDING_PROVIDER.to_string(),
            dimensions: defaults::DEFAULT_EMBEDDING_DIMENSIONS,
            l1_cache_size: defaults::DEFAULT_L1_CACHE_SIZE,
            l1_idle_secs: defaults::DEFAULT_L1_IDLE_SECS,
        }
    }
}
