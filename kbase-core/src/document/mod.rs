//! The document model: the immutable unit of retrievable knowledge.

pub mod content_type;
pub mod filter;
pub mod metadata;

use serde::{Deserialize, Serialize};

pub use content_type::ContentType;
pub use filter::MetadataFilter;
pub use metadata::{Metadata, MetadataValue};

use crate::errors::IndexError;

/// Well-known metadata keys.
pub mod keys {
    pub const ENTITY_NAME: &str = "entity_name";
    pub const BUSINESS_NAME: &str = "business_name";
    pub const SUBJECT_AREA: &str = "subject_area";
    pub const DESCRIPTION: &str = "description";
    pub const ATTRIBUTES: &str = "attributes";
    pub const BUSINESS_RULES: &str = "business_rules";
    pub const ATTRIBUTE_COUNT: &str = "attribute_count";
    pub const RULE_COUNT: &str = "rule_count";
    pub const RELATIONSHIP_NAME: &str = "relationship_name";
    pub const PARENT_ENTITY: &str = "parent_entity";
    pub const CHILD_ENTITY: &str = "child_entity";
    pub const RELATIONSHIP_TYPE: &str = "relationship_type";
    pub const ENTITIES: &str = "entities";
    pub const ENTITY_COUNT: &str = "entity_count";
    pub const TOTAL_ATTRIBUTES: &str = "total_attributes";
    pub const TOTAL_RULES: &str = "total_rules";
    pub const RULE_NAME: &str = "rule_name";
    pub const RULE_TEXT: &str = "rule_text";
}

/// A stored knowledge item: id, embedding, canonical text, and typed metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Unique, stable identifier.
    pub id: String,
    /// Embedding of `text`. Length must equal the index dimensionality.
    pub embedding: Vec<f32>,
    /// Canonical text the embedding was produced from.
    pub text: String,
    pub content_type: ContentType,
    pub metadata: Metadata,
}

impl Document {
    pub fn new(
        id: impl Into<String>,
        content_type: ContentType,
        text: impl Into<String>,
        embedding: Vec<f32>,
    ) -> Self {
        Self {
            id: id.into(),
            embedding,
            text: text.into(),
            content_type,
            metadata: Metadata::new(),
        }
    }

    /// Builder-style metadata insert.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn meta_str(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(MetadataValue::as_str)
    }

    pub fn meta_f64(&self, key: &str) -> Option<f64> {
        self.metadata.get(key).and_then(MetadataValue::as_f64)
    }

    pub fn meta_list(&self, key: &str) -> Option<&[String]> {
        self.metadata.get(key).and_then(MetadataValue::as_list)
    }

    /// Check that every key required by `content_type` is present and non-empty.
    pub fn validate_metadata(&self) -> Result<(), IndexError> {
        for key in self.content_type.required_keys() {
            let present = match self.metadata.get(*key) {
                Some(MetadataValue::Text(s)) => !s.trim().is_empty(),
                Some(MetadataValue::List(items)) => !items.is_empty(),
                Some(MetadataValue::Number(_)) => true,
                None => false,
            };
            if !present {
                return Err(IndexError::MissingMetadata {
                    id: self.id.clone(),
                    content_type: self.content_type.to_string(),
                    key: (*key).to_string(),
                });
            }
        }
        Ok(())
    }

    /// Human-facing name used for citations.
    pub fn display_name(&self) -> String {
        match self.content_type {
            ContentType::Entity => self.meta_str(keys::ENTITY_NAME).map(str::to_string),
            ContentType::Relationship => self
                .meta_str(keys::RELATIONSHIP_NAME)
                .map(str::to_string)
                .or_else(|| {
                    let parent = self.meta_str(keys::PARENT_ENTITY)?;
                    let child = self.meta_str(keys::CHILD_ENTITY)?;
                    Some(format!("{parent} → {child}"))
                }),
            ContentType::SubjectArea => self.meta_str(keys::SUBJECT_AREA).map(str::to_string),
            ContentType::BusinessRule => self.meta_str(keys::RULE_NAME).map(str::to_string),
        }
        .unwrap_or_else(|| self.id.clone())
    }
}
