//! Distance metrics and the fixed distance → confidence mapping.

use serde::{Deserialize, Serialize};

/// Distance metric used by the vector index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    /// `1 - cosine similarity`, range [0, 2].
    #[default]
    Cosine,
    /// L2 distance. Bounded by 2 for unit-norm embeddings.
    Euclidean,
}

impl DistanceMetric {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cosine" => Some(Self::Cosine),
            "euclidean" | "l2" => Some(Self::Euclidean),
            _ => None,
        }
    }

    /// Known maximum of the metric's range.
    pub fn max_distance(&self) -> f64 {
        2.0
    }

    /// Distance between two equal-length vectors. Never negative.
    ///
    /// A zero-norm operand has no direction, so its cosine similarity is
    /// taken as 0 (distance 1).
    pub fn distance(&self, a: &[f32], b: &[f32]) -> f64 {
        match self {
            Self::Cosine => {
                let mut dot = 0.0f64;
                let mut norm_a = 0.0f64;
                let mut norm_b = 0.0f64;
                for (x, y) in a.iter().zip(b) {
                    let (x, y) = (*x as f64, *y as f64);
                    dot += x * y;
                    norm_a += x * x;
                    norm_b += y * y;
                }
                if norm_a == 0.0 || norm_b == 0.0 {
                    return 1.0;
                }
                let sim = (dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(-1.0, 1.0);
                (1.0 - sim).max(0.0)
            }
            Self::Euclidean => a
                .iter()
                .zip(b)
                .map(|(x, y)| {
                    let d = (*x as f64) - (*y as f64);
                    d * d
                })
                .sum::<f64>()
                .sqrt(),
        }
    }

    /// `1 - distance / max_distance`, clamped to [0, 1]. Monotonically
    /// non-increasing in `distance`; NaN maps to 0.
    pub fn confidence(&self, distance: f64) -> f64 {
        if distance.is_nan() {
            return 0.0;
        }
        (1.0 - distance / self.max_distance()).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_vectors_have_zero_cosine_distance() {
        let d = DistanceMetric::Cosine.distance(&[0.3, 0.4], &[0.3, 0.4]);
        assert!(d.abs() < 1e-9);
        assert!((DistanceMetric::Cosine.confidence(d) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn opposite_vectors_have_max_cosine_distance() {
        let d = DistanceMetric::Cosine.distance(&[1.0, 0.0], &[-1.0, 0.0]);
        assert!((d - 2.0).abs() < 1e-9);
        assert_eq!(DistanceMetric::Cosine.confidence(d), 0.0);
    }

    #[test]
    fn orthogonal_vectors_map_to_half_confidence() {
        let d = DistanceMetric::Cosine.distance(&[1.0, 0.0], &[0.0, 1.0]);
        assert!((d - 1.0).abs() < 1e-9);
        assert!((DistanceMetric::Cosine.confidence(d) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn magnitude_does_not_change_cosine_distance() {
        let a = DistanceMetric::Cosine.distance(&[1.0, 2.0], &[2.0, 1.0]);
        let b = DistanceMetric::Cosine.distance(&[10.0, 20.0], &[2.0, 1.0]);
        assert!((a - b).abs() < 1e-9);
    }

    #[test]
    fn zero_vector_is_treated_as_orthogonal() {
        assert_eq!(DistanceMetric::Cosine.distance(&[0.0, 0.0], &[1.0, 0.0]), 1.0);
    }

    #[test]
    fn confidence_clamps_out_of_range() {
        assert_eq!(DistanceMetric::Euclidean.confidence(5.0), 0.0);
        assert_eq!(DistanceMetric::Cosine.confidence(-0.5), 1.0);
        assert_eq!(DistanceMetric::Cosine.confidence(f64::NAN), 0.0);
    }

    #[test]
    fn parse_accepts_aliases() {
        assert_eq!(DistanceMetric::parse("Cosine"), Some(DistanceMetric::Cosine));
        assert_eq!(DistanceMetric::parse("l2"), Some(DistanceMetric::Euclidean));
        assert_eq!(DistanceMetric::parse("dot"), None);
    }
}
