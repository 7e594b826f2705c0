use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::defaults;

/// Coarse display bucket for a confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
    None,
}

impl ConfidenceTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::None => "none",
        }
    }
}

impl fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive lower bounds of the `high` and `medium` tiers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierThresholds {
    pub high: f64,
    pub medium: f64,
}

impl TierThresholds {
    pub fn new(high: f64, medium: f64) -> Self {
        Self { high, medium }
    }

    /// `high` if c >= high, `medium` if c >= medium, `low` if c > 0,
    /// otherwise (or with no result at all) `none`.
    pub fn classify(&self, confidence: Option<f64>) -> ConfidenceTier {
        match confidence {
            Some(c) if c >= self.high => ConfidenceTier::High,
            Some(c) if c >= self.medium => ConfidenceTier::Medium,
            Some(c) if c > 0.0 => ConfidenceTier::Low,
            _ => ConfidenceTier::None,
        }
    }
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            high: defaults::DEFAULT_HIGH_THRESHOLD,
            medium: defaults::DEFAULT_MEDIUM_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_are_inclusive_lower_bounds() {
        let t = TierThresholds::default();
        assert_eq!(t.classify(Some(0.3)), ConfidenceTier::High);
        assert_eq!(t.classify(Some(0.299_999)), ConfidenceTier::Medium);
        assert_eq!(t.classify(Some(0.1)), ConfidenceTier::Medium);
        assert_eq!(t.classify(Some(0.099_999)), ConfidenceTier::Low);
        assert_eq!(t.classify(Some(f64::MIN_POSITIVE)), ConfidenceTier::Low);
        assert_eq!(t.classify(Some(0.0)), ConfidenceTier::None);
        assert_eq!(t.classify(None), ConfidenceTier::None);
    }

    #[test]
    fn custom_thresholds_apply() {
        let t = TierThresholds::new(0.9, 0.6);
        assert_eq!(t.classify(Some(0.75)), ConfidenceTier::Medium);
        assert_eq!(t.classify(Some(0.5)), ConfidenceTier::Low);
    }
}
