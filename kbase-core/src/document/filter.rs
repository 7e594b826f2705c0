use serde::{Deserialize, Serialize};

use super::{ContentType, Document, MetadataValue};

/// Equality pre-filter applied to candidates before any distance is computed.
///
/// All clauses must hold. An empty filter matches every document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataFilter {
    pub content_type: Option<ContentType>,
    pub equals: Vec<(String, MetadataValue)>,
}

impl MetadataFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to one content type.
    pub fn content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = Some(content_type);
        self
    }

    /// Require `metadata[key] == value`.
    pub fn where_eq(mut self, key: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        self.equals.push((key.into(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.content_type.is_none() && self.equals.is_empty()
    }

    pub fn matches(&self, doc: &Document) -> bool {
        if let Some(ct) = self.content_type {
            if doc.content_type != ct {
                return false;
            }
        }
        self.equals
            .iter()
            .all(|(key, expected)| doc.metadata.get(key) == Some(expected))
    }
}
