//! Knowledge model JSON schema.

use std::path::Path;

use serde::{Deserialize, Serialize};

use kbase_core::errors::{KbaseError, KbaseResult};

/// A complete data model: header, entities, and the relationships between them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeModel {
    pub model_info: ModelInfo,
    #[serde(default)]
    pub entities: Vec<EntityDef>,
    #[serde(default)]
    pub relationships: Vec<RelationshipDef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityDef {
    pub name: String,
    /// Falls back to `name` when absent.
    #[serde(default)]
    pub business_name: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub subject_area: String,
    #[serde(default)]
    pub attributes: Vec<String>,
    #[serde(default)]
    pub business_rules: Vec<String>,
}

impl EntityDef {
    pub fn business_name(&self) -> &str {
        self.business_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelationshipDef {
    pub name: String,
    pub parent_entity: String,
    pub child_entity: String,
    #[serde(default)]
    pub relationship_type: String,
    #[serde(default)]
    pub description: String,
}

impl KnowledgeModel {
    pub fn from_json(input: &str) -> KbaseResult<Self> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> KbaseResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| KbaseError::ConfigError {
            reason: format!("{}: {e}", path.display()),
        })?;
        Self::from_json(&raw)
    }
}
