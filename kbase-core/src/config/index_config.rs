use serde::{Deserialize, Serialize};

use super::defaults;

/// Vector index configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Fixed dimensionality `D` of every stored embedding.
    pub dimensions: usize,
    /// Distance metric: "cosine" or "euclidean".
    pub metric: String,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            dimensions: defaults::DEFAULT_INDEX_DIMENSIONS,
            metric: defaults::DEFAULT_METRIC.to_string(),
        }
    }
}
