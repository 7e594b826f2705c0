use crate::document::{Document, MetadataFilter};
use crate::errors::KbaseResult;
use crate::metric::DistanceMetric;
use crate::models::QueryResult;

/// Nearest-neighbour document store.
///
/// `search` must be safe for concurrent readers. `insert` and `clear` are
/// used while loading, before sessions are accepted.
pub trait IVectorIndex: Send + Sync {
    /// Add a document. Fails with `DuplicateId`, `DimensionMismatch`, or
    /// `MissingMetadata`; on failure the index is unchanged.
    fn insert(&self, document: Document) -> KbaseResult<()>;

    /// At most `k` results sorted by ascending distance, ties in insertion
    /// order. `filter` narrows the candidate set before distances are computed.
    fn search(
        &self,
        query: &[f32],
        k: usize,
        filter: Option<&MetadataFilter>,
    ) -> KbaseResult<Vec<QueryResult>>;

    /// Number of stored documents.
    fn count(&self) -> usize;

    /// Remove every document.
    fn clear(&self);

    /// Fixed embedding dimensionality `D`.
    fn dimensions(&self) -> usize;

    /// Metric the reported distances are measured in.
    fn metric(&self) -> DistanceMetric;

    /// Counter bumped on every successful mutation. Lets caches detect a
    /// repopulated index.
    fn generation(&self) -> u64;
}
