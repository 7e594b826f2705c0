use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::keys;

/// The kind of knowledge a document carries. Determines which metadata keys
/// are required and which formatter the composer uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Entity,
    Relationship,
    SubjectArea,
    BusinessRule,
}

impl ContentType {
    pub const ALL: [ContentType; 4] = [
        Self::Entity,
        Self::Relationship,
        Self::SubjectArea,
        Self::BusinessRule,
    ];

    /// Wire name, also used as the metadata `type` value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Entity => "entity",
            Self::Relationship => "relationship",
            Self::SubjectArea => "subject_area",
            Self::BusinessRule => "business_rule",
        }
    }

    /// Metadata keys a document of this type must carry.
    pub fn required_keys(&self) -> &'static [&'static str] {
        match self {
            Self::Entity => &[keys::ENTITY_NAME],
            Self::Relationship => &[keys::PARENT_ENTITY, keys::CHILD_ENTITY],
            Self::SubjectArea => &[keys::SUBJECT_AREA],
            Self::BusinessRule => &[keys::ENTITY_NAME],
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = String;

    /// Accepts both the snake_case wire names and camelCase spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "entity" => Ok(Self::Entity),
            "relationship" => Ok(Self::Relationship),
            "subject_area" | "subjectArea" => Ok(Self::SubjectArea),
            "business_rule" | "businessRule" => Ok(Self::BusinessRule),
            other => Err(format!("unknown content type '{other}'")),
        }
    }
}
