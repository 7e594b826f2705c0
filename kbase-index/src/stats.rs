//! Per-type and per-subject-area document counts.

use std::collections::BTreeMap;

use serde::Serialize;

use kbase_core::document::keys;
use kbase_core::{ContentType, Document};

/// Snapshot of what the index holds.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IndexStats {
    pub total: usize,
    pub by_type: BTreeMap<ContentType, usize>,
    /// Entity documents per subject area.
    pub entities_by_subject_area: BTreeMap<String, usize>,
}

impl IndexStats {
    pub(crate) fn collect<'a>(docs: impl Iterator<Item = &'a Document>) -> Self {
        let mut stats = Self::default();
        for doc in docs {
            stats.total += 1;
            *stats.by_type.entry(doc.content_type).or_default() += 1;
            if doc.content_type == ContentType::Entity {
                if let Some(area) = doc.meta_str(keys::SUBJECT_AREA) {
                    *stats
                        .entities_by_subject_area
                        .entry(area.to_string())
                        .or_default() += 1;
                }
            }
        }
        stats
    }

    pub fn count_of(&self, content_type: ContentType) -> usize {
        self.by_type.get(&content_type).copied().unwrap_or(0)
    }
}
