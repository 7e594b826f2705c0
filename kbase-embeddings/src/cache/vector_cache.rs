//! Vectors already computed, keyed by the provider that produced them and
//! a blake3 digest of the input text.

use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;

/// Cache key. Two providers never share an entry even for identical text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VectorKey {
    provider: Arc<str>,
    digest: [u8; 32],
}

impl VectorKey {
    pub fn new(provider: Arc<str>, text: &str) -> Self {
        Self {
            provider,
            digest: *blake3::hash(text.as_bytes()).as_bytes(),
        }
    }

    /// Short hex prefix of the digest, for logs.
    pub fn short_hex(&self) -> String {
        self.digest[..6].iter().map(|b| format!("{b:02x}")).collect()
    }
}

/// Bounded embedding cache. A capacity of zero disables it.
pub struct VectorCache {
    cache: Option<Cache<VectorKey, Arc<[f32]>>>,
}

impl VectorCache {
    /// `idle` of `None` keeps entries until evicted by capacity.
    pub fn new(capacity: u64, idle: Option<Duration>) -> Self {
        if capacity == 0 {
            return Self { cache: None };
        }
        let mut builder = Cache::builder().max_capacity(capacity);
        if let Some(idle) = idle {
            builder = builder.time_to_idle(idle);
        }
        Self {
            cache: Some(builder.build()),
        }
    }

    pub fn get(&self, key: &VectorKey) -> Option<Vec<f32>> {
        self.cache.as_ref()?.get(key).map(|v| v.to_vec())
    }

    pub fn insert(&self, key: VectorKey, embedding: &[f32]) {
        if let Some(cache) = &self.cache {
            cache.insert(key, Arc::from(embedding));
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.cache.is_some()
    }

    pub fn clear(&self) {
        if let Some(cache) = &self.cache {
            cache.invalidate_all();
        }
    }
}
