use serde::{Deserialize, Serialize};

use crate::constants;
use crate::document::ContentType;

use super::ConfidenceTier;

/// A citation for one ranked result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub name: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub confidence: f64,
}

/// The engine's output for one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub text: String,
    pub confidence_tier: ConfidenceTier,
    /// Confidence of the top-ranked result, if any.
    pub confidence: Option<f64>,
    /// Every ranked result, best first.
    pub sources: Vec<Source>,
    /// False only when nothing met the minimum confidence (or the engine
    /// could not run at all).
    pub succeeded: bool,
}

impl Answer {
    /// The fixed "no relevant information found" answer.
    pub fn no_results() -> Self {
        Self::unsuccessful(constants::NO_RESULTS_MESSAGE)
    }

    /// Degraded-state answer, e.g. while the embedding model warms up.
    pub fn degraded(text: impl Into<String>) -> Self {
        Self::unsuccessful(text)
    }

    fn unsuccessful(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            confidence_tier: ConfidenceTier::None,
            confidence: None,
            sources: Vec::new(),
            succeeded: false,
        }
    }
}
