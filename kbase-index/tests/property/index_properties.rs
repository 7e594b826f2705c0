use std::collections::HashSet;

use kbase_core::document::keys;
use kbase_core::traits::IVectorIndex;
use kbase_core::{ContentType, DistanceMetric, Document};
use kbase_index::InMemoryIndex;
use proptest::prelude::*;

const DIMS: usize = 6;

fn arb_embedding(dims: usize) -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(-1.0f32..1.0, dims)
}

fn entity(id: String, embedding: Vec<f32>) -> Document {
    Document::new(id.clone(), ContentType::Entity, format!("Entity: {id}"), embedding)
        .with_metadata(keys::ENTITY_NAME, id)
}

// ── Distinct ids are never conflated in results ─────────────────────────

proptest! {
    #[test]
    fn search_never_conflates_ids(
        embeddings in prop::collection::vec(arb_embedding(DIMS), 1..30),
        query in arb_embedding(DIMS),
    ) {
        let index = InMemoryIndex::new(DIMS, DistanceMetric::Cosine);
        for (i, e) in embeddings.iter().enumerate() {
            index.insert(entity(format!("doc-{i}"), e.clone())).unwrap();
        }

        let results = index.search(&query, embeddings.len(), None).unwrap();
        prop_assert_eq!(results.len(), embeddings.len());

        let ids: HashSet<&str> = results.iter().map(|r| r.document.id.as_str()).collect();
        prop_assert_eq!(ids.len(), results.len(), "duplicate id in results");

        // Each result carries the embedding it was inserted with.
        for r in &results {
            let i: usize = r.document.id["doc-".len()..].parse().unwrap();
            prop_assert_eq!(&r.document.embedding, &embeddings[i]);
        }
    }
}

// ── Wrong-length embeddings always fail and leave the index unchanged ───

proptest! {
    #[test]
    fn dimension_mismatch_leaves_count_unchanged(
        seeded in 0usize..10,
        bad_len in (0usize..16).prop_filter("must differ from DIMS", |n| *n != DIMS),
    ) {
        let index = InMemoryIndex::new(DIMS, DistanceMetric::Cosine);
        for i in 0..seeded {
            index.insert(entity(format!("doc-{i}"), vec![0.5; DIMS])).unwrap();
        }
        let before = index.count();
        let generation = index.generation();

        let err = index.insert(entity("bad".into(), vec![0.1; bad_len])).unwrap_err();
        prop_assert!(err.to_string().contains("dimension mismatch"));
        prop_assert_eq!(index.count(), before);
        prop_assert_eq!(index.generation(), generation);
        prop_assert!(index.get("bad").is_none());
    }
}

// ── Results are sorted, bounded by k, and confidence tracks distance ────

proptest! {
    #[test]
    fn results_sorted_and_bounded(
        embeddings in prop::collection::vec(arb_embedding(DIMS), 0..25),
        query in arb_embedding(DIMS),
        k in 0usize..10,
    ) {
        let index = InMemoryIndex::new(DIMS, DistanceMetric::Cosine);
        for (i, e) in embeddings.into_iter().enumerate() {
            index.insert(entity(format!("doc-{i}"), e)).unwrap();
        }
        let results = index.search(&query, k, None).unwrap();
        prop_assert!(results.len() <= k);
        for w in results.windows(2) {
            prop_assert!(w[0].distance <= w[1].distance);
            prop_assert!(w[0].confidence >= w[1].confidence);
        }
    }
}
