use std::sync::Arc;

use crate::document::Document;
use crate::metric::DistanceMetric;

/// One search hit. The index keeps ownership of the document; the result
/// holds a shared read-only handle.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    pub document: Arc<Document>,
    /// Raw, non-negative distance from the query vector.
    pub distance: f64,
    /// Derived from `distance`; in [0, 1].
    pub confidence: f64,
}

impl QueryResult {
    pub fn new(document: Arc<Document>, distance: f64, metric: DistanceMetric) -> Self {
        Self {
            document,
            distance,
            confidence: metric.confidence(distance),
        }
    }
}
