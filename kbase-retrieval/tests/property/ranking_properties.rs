use std::sync::Arc;

use kbase_core::document::keys;
use kbase_core::models::TierThresholds;
use kbase_core::{ContentType, DistanceMetric, Document, QueryResult};
use kbase_retrieval::{Ranker, ResponseComposer};
use proptest::prelude::*;

fn result(i: usize, distance: f64) -> QueryResult {
    let doc = Document::new(format!("doc-{i}"), ContentType::Entity, "", vec![1.0])
        .with_metadata(keys::ENTITY_NAME, format!("Entity{i}"));
    QueryResult::new(Arc::new(doc), distance, DistanceMetric::Cosine)
}

fn arb_results() -> impl Strategy<Value = Vec<QueryResult>> {
    prop::collection::vec(0.0f64..=2.0, 0..25).prop_map(|distances| {
        distances
            .into_iter()
            .enumerate()
            .map(|(i, d)| result(i, d))
            .collect()
    })
}

// ── Ranking is idempotent ───────────────────────────────────────────────

proptest! {
    #[test]
    fn rank_is_idempotent(results in arb_results(), min in 0.0f64..=1.0) {
        let ranker = Ranker::default();
        let once = ranker.rank(results, min);
        let twice = ranker.rank(once.clone(), min);
        prop_assert_eq!(once, twice);
    }
}

// ── Ranked output is ordered and respects the minimum ───────────────────

proptest! {
    #[test]
    fn ranked_is_sorted_and_above_minimum(results in arb_results(), min in 0.0f64..=1.0) {
        let input_len = results.len();
        let ranked = Ranker::default().rank(results, min);
        prop_assert!(ranked.len() <= input_len);
        prop_assert!(ranked.windows(2).all(|w| w[0].distance <= w[1].distance));
        prop_assert!(ranked.windows(2).all(|w| w[0].confidence >= w[1].confidence));
        for r in &ranked {
            prop_assert!(r.confidence >= min);
            prop_assert!((0.0..=1.0).contains(&r.confidence));
        }
    }
}

// ── Composer: tier agrees with the top confidence, sources cover results ─

proptest! {
    #[test]
    fn composed_answer_matches_ranking(results in arb_results(), min in 0.0f64..=1.0) {
        let ranked = Ranker::default().rank(results, min);
        let answer = ResponseComposer::default().compose("question", &ranked);

        prop_assert_eq!(answer.sources.len(), ranked.len());
        prop_assert_eq!(answer.succeeded, !ranked.is_empty());
        prop_assert_eq!(
            answer.confidence_tier,
            TierThresholds::default().classify(ranked.first().map(|r| r.confidence))
        );
        if let Some(top) = ranked.first() {
            let name = top.document.display_name();
            prop_assert!(answer.text.contains(&name));
        }
    }
}
