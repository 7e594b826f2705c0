//! Ranker: distance → confidence, threshold, order.

use kbase_core::models::TierThresholds;
use kbase_core::{ConfidenceTier, DistanceMetric, QueryResult};

/// Applies the confidence mapping and minimum-confidence cut to raw
/// index results.
#[derive(Debug, Clone, Copy)]
pub struct Ranker {
    metric: DistanceMetric,
    thresholds: TierThresholds,
}

impl Ranker {
    pub fn new(metric: DistanceMetric, thresholds: TierThresholds) -> Self {
        Self { metric, thresholds }
    }

    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    /// Recompute every confidence from its distance, drop results below
    /// `min_confidence`, and order by ascending distance.
    ///
    /// The sort is stable, so index order survives among equal distances and
    /// ranking an already-ranked list returns it unchanged.
    pub fn rank(&self, results: Vec<QueryResult>, min_confidence: f64) -> Vec<QueryResult> {
        let mut ranked: Vec<QueryResult> = results
            .into_iter()
            .map(|mut r| {
                r.confidence = self.metric.confidence(r.distance);
                r
            })
            .filter(|r| r.confidence >= min_confidence)
            .collect();
        ranked.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        ranked
    }

    /// Tier of the best result, or `none` when the list is empty.
    pub fn tier(&self, ranked: &[QueryResult]) -> ConfidenceTier {
        self.thresholds.classify(ranked.first().map(|r| r.confidence))
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new(DistanceMetric::default(), TierThresholds::default())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use kbase_core::document::keys;
    use kbase_core::{ContentType, Document};

    use super::*;

    fn result(id: &str, distance: f64) -> QueryResult {
        let doc = Document::new(id, ContentType::Entity, "", vec![1.0])
            .with_metadata(keys::ENTITY_NAME, id);
        QueryResult {
            document: Arc::new(doc),
            distance,
            // Deliberately stale; rank() recomputes it.
            confidence: 0.0,
        }
    }

    #[test]
    fn recomputes_confidence_from_distance() {
        let ranked = Ranker::default().rank(vec![result("a", 0.5)], 0.0);
        assert!((ranked[0].confidence - 0.75).abs() < 1e-9);
    }

    #[test]
    fn drops_results_below_minimum() {
        let ranked = Ranker::default().rank(
            vec![result("near", 0.2), result("far", 1.9)],
            0.1,
        );
        let ids: Vec<_> = ranked.iter().map(|r| r.document.id.as_str()).collect();
        assert_eq!(ids, vec!["near"]);
    }

    #[test]
    fn minimum_is_inclusive() {
        // distance 1.5 → confidence 0.25, exact in f64
        let ranked = Ranker::default().rank(
            vec![result("edge", 1.5), result("below", 1.5000001)],
            0.25,
        );
        let ids: Vec<_> = ranked.iter().map(|r| r.document.id.as_str()).collect();
        assert_eq!(ids, vec!["edge"]);
    }

    #[test]
    fn reorders_by_ascending_distance() {
        let ranked = Ranker::default().rank(
            vec![result("c", 0.9), result("a", 0.1), result("b", 0.5)],
            0.0,
        );
        let ids: Vec<_> = ranked.iter().map(|r| r.document.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn empty_list_is_tier_none() {
        let ranker = Ranker::default();
        assert_eq!(ranker.tier(&[]), ConfidenceTier::None);
        let ranked = ranker.rank(vec![result("a", 0.0)], 0.0);
        assert_eq!(ranker.tier(&ranked), ConfidenceTier::High);
    }
}
