//! Answer cache keyed by question text, scoped to one index generation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use kbase_core::Answer;
use moka::sync::Cache;
use tracing::debug;

/// Bounded question → answer cache.
///
/// Entries are only valid for the index generation they were computed
/// against; observing a new generation drops everything.
pub struct AnswerCache {
    cache: Option<Cache<String, Answer>>,
    generation: AtomicU64,
}

impl AnswerCache {
    /// A capacity of zero disables caching.
    pub fn new(capacity: u64, ttl: Duration) -> Self {
        let cache = (capacity > 0).then(|| {
            Cache::builder()
                .max_capacity(capacity)
                .time_to_live(ttl)
                .build()
        });
        Self {
            cache,
            generation: AtomicU64::new(0),
        }
    }

    pub fn get(&self, question: &str, generation: u64) -> Option<Answer> {
        let cache = self.cache.as_ref()?;
        self.observe(generation);
        cache.get(question)
    }

    /// Store an answer computed against `generation`. Ignored if the index
    /// has moved on since.
    pub fn insert(&self, question: &str, answer: Answer, generation: u64) {
        let Some(cache) = self.cache.as_ref() else {
            return;
        };
        if self.generation.load(Ordering::Acquire) == generation {
            cache.insert(question.to_string(), answer);
        }
    }

    pub fn entry_count(&self) -> u64 {
        self.cache.as_ref().map_or(0, |c| {
            c.run_pending_tasks();
            c.entry_count()
        })
    }

    pub fn clear(&self) {
        if let Some(cache) = &self.cache {
            cache.invalidate_all();
        }
    }

    fn observe(&self, generation: u64) {
        let seen = self.generation.swap(generation, Ordering::AcqRel);
        if seen != generation {
            debug!(from = seen, to = generation, "index changed, answer cache invalidated");
            self.clear();
        }
    }
}
