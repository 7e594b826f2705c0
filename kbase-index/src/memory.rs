//! InMemoryIndex: documents in insertion order behind a `RwLock`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use kbase_core::errors::{IndexError, KbaseResult};
use kbase_core::traits::IVectorIndex;
use kbase_core::{DistanceMetric, Document, MetadataFilter, QueryResult};

use crate::stats::IndexStats;

#[derive(Default)]
struct IndexState {
    /// Insertion order doubles as the tie-breaker for equal distances.
    documents: Vec<Arc<Document>>,
    positions: HashMap<String, usize>,
}

/// Linear-scan vector index. Many concurrent readers, writes serialized.
pub struct InMemoryIndex {
    dimensions: usize,
    metric: DistanceMetric,
    state: RwLock<IndexState>,
    generation: AtomicU64,
}

impl InMemoryIndex {
    pub fn new(dimensions: usize, metric: DistanceMetric) -> Self {
        Self {
            dimensions,
            metric,
            state: RwLock::new(IndexState::default()),
            generation: AtomicU64::new(0),
        }
    }

    /// Look up a document by id.
    pub fn get(&self, id: &str) -> Option<Arc<Document>> {
        let state = self.read();
        state
            .positions
            .get(id)
            .map(|&pos| Arc::clone(&state.documents[pos]))
    }

    pub fn stats(&self) -> IndexStats {
        let state = self.read();
        IndexStats::collect(state.documents.iter().map(|d| d.as_ref()))
    }

    // Writers never leave the state half-updated, so a poisoned lock still
    // guards consistent data.
    fn read(&self) -> RwLockReadGuard<'_, IndexState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, IndexState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_dimensions(&self, actual: usize) -> Result<(), IndexError> {
        if actual != self.dimensions {
            return Err(IndexError::DimensionMismatch {
                expected: self.dimensions,
                actual,
            });
        }
        Ok(())
    }
}

impl IVectorIndex for InMemoryIndex {
    fn insert(&self, document: Document) -> KbaseResult<()> {
        self.check_dimensions(document.embedding.len())?;
        document.validate_metadata()?;

        let mut state = self.write();
        if state.positions.contains_key(&document.id) {
            return Err(IndexError::DuplicateId { id: document.id }.into());
        }

        let pos = state.documents.len();
        state.positions.insert(document.id.clone(), pos);
        state.documents.push(Arc::new(document));
        self.generation.fetch_add(1, Ordering::Release);
        Ok(())
    }

    fn search(
        &self,
        query: &[f32],
        k: usize,
        filter: Option<&MetadataFilter>,
    ) -> KbaseResult<Vec<QueryResult>> {
        self.check_dimensions(query.len())?;
        if k == 0 {
            return Ok(Vec::new());
        }

        let state = self.read();
        let mut scored: Vec<(usize, f64)> = state
            .documents
            .iter()
            .enumerate()
            .filter(|(_, doc)| filter.map_or(true, |f| f.matches(doc)))
            .map(|(pos, doc)| (pos, self.metric.distance(query, &doc.embedding)))
            .collect();

        // Stable sort keeps insertion order among equal distances.
        scored.sort_by(|a, b| a.1.total_cmp(&b.1));
        scored.truncate(k);

        debug!(
            candidates = state.documents.len(),
            returned = scored.len(),
            filtered = filter.is_some(),
            "index search complete"
        );

        Ok(scored
            .into_iter()
            .map(|(pos, distance)| {
                QueryResult::new(Arc::clone(&state.documents[pos]), distance, self.metric)
            })
            .collect())
    }

    fn count(&self) -> usize {
        self.read().documents.len()
    }

    fn clear(&self) {
        let mut state = self.write();
        state.documents.clear();
        state.positions.clear();
        self.generation.fetch_add(1, Ordering::Release);
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn metric(&self) -> DistanceMetric {
        self.metric
    }

    fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }
}
