//! Provider selection.

pub mod hashing;

use std::sync::Arc;

use kbase_core::config::EmbeddingConfig;
use kbase_core::traits::IEmbeddingProvider;
use tracing::{info, warn};

pub use hashing::HashingProvider;

/// Build the provider named in config. Unknown names fall back to hashing.
pub fn create_provider(config: &EmbeddingConfig) -> Arc<dyn IEmbeddingProvider> {
    match config.provider.as_str() {
        "hashing" => {
            info!(dims = config.dimensions, "using hashing embedding provider");
        }
        other => {
            warn!(
                requested = other,
                "unknown embedding provider, falling back to hashing"
            );
        }
    }
    Arc::new(HashingProvider::new(config.dimensions))
}
