use kbase_core::DistanceMetric;
use proptest::prelude::*;

fn arb_vec(dims: usize) -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(-10.0f32..10.0, dims)
}

// ── Confidence is monotonic in distance ─────────────────────────────────

proptest! {
    #[test]
    fn lower_distance_never_has_lower_confidence(a in 0.0f64..3.0, b in 0.0f64..3.0) {
        for metric in [DistanceMetric::Cosine, DistanceMetric::Euclidean] {
            let (ca, cb) = (metric.confidence(a), metric.confidence(b));
            if a < b {
                prop_assert!(ca >= cb, "{metric:?}: d={a} c={ca} vs d={b} c={cb}");
            }
            prop_assert!((0.0..=1.0).contains(&ca));
        }
    }
}

// ── Cosine distance stays within [0, 2] and is symmetric ────────────────

proptest! {
    #[test]
    fn cosine_distance_is_bounded_and_symmetric(a in arb_vec(8), b in arb_vec(8)) {
        let d_ab = DistanceMetric::Cosine.distance(&a, &b);
        let d_ba = DistanceMetric::Cosine.distance(&b, &a);
        prop_assert!((0.0..=2.0 + 1e-9).contains(&d_ab));
        prop_assert!((d_ab - d_ba).abs() < 1e-9);
    }
}
