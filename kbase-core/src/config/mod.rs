//! Layered configuration loaded from TOML. Every section falls back to
//! the values in [`defaults`].

pub mod compose_config;
pub mod defaults;
pub mod embedding_config;
pub mod index_config;
pub mod observability_config;
pub mod retrieval_config;
pub mod server_config;
pub mod session_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use compose_config::ComposeConfig;
pub use embedding_config::EmbeddingConfig;
pub use index_config::IndexConfig;
pub use observability_config::ObservabilityConfig;
pub use retrieval_config::RetrievalConfig;
pub use server_config::ServerConfig;
pub use session_config::SessionConfig;

use crate::errors::{KbaseError, KbaseResult};
use crate::metric::DistanceMetric;

/// Top-level configuration for the whole assistant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KbaseConfig {
    pub index: IndexConfig,
    pub embedding: EmbeddingConfig,
    pub retrieval: RetrievalConfig,
    pub compose: ComposeConfig,
    pub session: SessionConfig,
    pub server: ServerConfig,
    pub observability: ObservabilityConfig,
}

impl KbaseConfig {
    /// Parse from a TOML string. Missing sections and keys take defaults.
    pub fn from_toml(input: &str) -> KbaseResult<Self> {
        let config: Self = toml::from_str(input).map_err(|e| KbaseError::ConfigError {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> KbaseResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| KbaseError::ConfigError {
            reason: format!("{}: {e}", path.display()),
        })?;
        Self::from_toml(&raw)
    }

    /// Reject combinations the engine cannot run with.
    pub fn validate(&self) -> KbaseResult<()> {
        let fail = |reason: String| Err(KbaseError::ConfigError { reason });

        if self.index.dimensions == 0 {
            return fail("index.dimensions must be greater than zero".into());
        }
        if self.embedding.dimensions != self.index.dimensions {
            return fail(format!(
                "embedding.dimensions ({}) must equal index.dimensions ({})",
                self.embedding.dimensions, self.index.dimensions
            ));
        }
        if DistanceMetric::parse(&self.index.metric).is_none() {
            return fail(format!("unknown index.metric '{}'", self.index.metric));
        }

        let r = &self.retrieval;
        if r.top_k == 0 {
            return fail("retrieval.top_k must be greater than zero".into());
        }
        if !(0.0..=1.0).contains(&r.min_confidence) {
            return fail(format!(
                "retrieval.min_confidence must be within [0, 1], got {}",
                r.min_confidence
            ));
        }
        if !(0.0 <= r.medium_threshold
            && r.medium_threshold <= r.high_threshold
            && r.high_threshold <= 1.0)
        {
            return fail(format!(
                "tier thresholds must satisfy 0 <= medium ({}) <= high ({}) <= 1",
                r.medium_threshold, r.high_threshold
            ));
        }

        if self.session.heartbeat_timeout_ms == 0 || self.session.heartbeat_interval_ms == 0 {
            return fail("session heartbeat interval and timeout must be non-zero".into());
        }
        if self.session.max_pending_frames == 0 {
            return fail("session.max_pending_frames must be greater than zero".into());
        }

        Ok(())
    }

    /// The configured distance metric.
    pub fn metric(&self) -> DistanceMetric {
        DistanceMetric::parse(&self.index.metric).unwrap_or_default()
    }
}
