//! ResponseComposer: ranked results → natural-language answer.

pub mod format;
pub mod item;
pub mod sections;

use kbase_core::config::ComposeConfig;
use kbase_core::models::TierThresholds;
use kbase_core::{Answer, QueryResult, Source};
use tracing::debug;

pub use item::KnowledgeItem;

/// Builds an [`Answer`] from a ranked result list.
///
/// The top result picks the strategy by its content type. Lower-ranked
/// results with positive confidence are listed as related matches, and
/// every ranked result is cited.
#[derive(Debug, Clone)]
pub struct ResponseComposer {
    config: ComposeConfig,
    thresholds: TierThresholds,
}

impl ResponseComposer {
    pub fn new(config: ComposeConfig, thresholds: TierThresholds) -> Self {
        Self { config, thresholds }
    }

    pub fn compose(&self, question: &str, ranked: &[QueryResult]) -> Answer {
        let Some((top, rest)) = ranked.split_first() else {
            debug!(question, "nothing to compose");
            return Answer::no_results();
        };

        let item = KnowledgeItem::from_document(&top.document);
        let mut text = format::render(&item, self.config.sample_size);

        let related = self.related(&item, rest);
        if !related.is_empty() {
            text.push_str("\n\nRelated:");
            for line in &related {
                text.push('\n');
                text.push_str(line);
            }
        }

        text.push_str("\n\n");
        text.push_str(&format::relevance_line(top.confidence));

        debug!(
            question,
            strategy = %item.content_type(),
            related = related.len(),
            sources = ranked.len(),
            "answer composed"
        );

        Answer {
            text,
            confidence_tier: self.thresholds.classify(Some(top.confidence)),
            confidence: Some(top.confidence),
            sources: ranked.iter().map(source).collect(),
            succeeded: true,
        }
    }

    /// Lines for lower-ranked matches. When the answer is about an entity,
    /// relationships that do not touch it are skipped.
    fn related(&self, top: &KnowledgeItem, rest: &[QueryResult]) -> Vec<String> {
        let focus = match top {
            KnowledgeItem::Entity(e) => Some(e.name.as_str()),
            _ => None,
        };

        rest.iter()
            .filter(|r| r.confidence > 0.0)
            .map(|r| KnowledgeItem::from_document(&r.document))
            .filter(|candidate| match (focus, candidate) {
                (Some(name), KnowledgeItem::Relationship(_)) => candidate.mentions().contains(&name),
                _ => true,
            })
            .take(self.config.related_limit)
            .map(|candidate| format::related_line(&candidate))
            .collect()
    }
}

impl Default for ResponseComposer {
    fn default() -> Self {
        Self::new(ComposeConfig::default(), TierThresholds::default())
    }
}

fn source(result: &QueryResult) -> Source {
    Source {
        name: result.document.display_name(),
        content_type: result.document.content_type,
        confidence: result.confidence,
    }
}
