//! Typed views over a retrieved document, one variant per content type.

use kbase_core::document::keys;
use kbase_core::{ContentType, Document};

use super::sections::{self, Section};

/// What a retrieved document describes, with the fields each answer
/// strategy needs. Built from metadata first, falling back to the text.
#[derive(Debug, Clone, PartialEq)]
pub enum KnowledgeItem {
    Entity(EntityItem),
    Relationship(RelationshipItem),
    SubjectArea(SubjectAreaItem),
    BusinessRule(BusinessRuleItem),
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntityItem {
    pub name: String,
    pub business_name: Option<String>,
    pub subject_area: Option<String>,
    pub description: Option<String>,
    pub attributes: Vec<String>,
    pub attribute_total: usize,
    pub rules: Vec<String>,
    pub rule_total: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RelationshipItem {
    pub name: Option<String>,
    pub parent: String,
    pub child: String,
    pub relationship_type: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubjectAreaItem {
    pub name: String,
    pub description: Option<String>,
    pub entities: Vec<String>,
    pub entity_total: usize,
    pub total_attributes: Option<usize>,
    pub total_rules: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BusinessRuleItem {
    pub name: Option<String>,
    pub rule: String,
    pub entities: Vec<String>,
}

impl KnowledgeItem {
    pub fn from_document(doc: &Document) -> Self {
        match doc.content_type {
            ContentType::Entity => Self::Entity(EntityItem::from_document(doc)),
            ContentType::Relationship => Self::Relationship(RelationshipItem::from_document(doc)),
            ContentType::SubjectArea => Self::SubjectArea(SubjectAreaItem::from_document(doc)),
            ContentType::BusinessRule => Self::BusinessRule(BusinessRuleItem::from_document(doc)),
        }
    }

    pub fn content_type(&self) -> ContentType {
        match self {
            Self::Entity(_) => ContentType::Entity,
            Self::Relationship(_) => ContentType::Relationship,
            Self::SubjectArea(_) => ContentType::SubjectArea,
            Self::BusinessRule(_) => ContentType::BusinessRule,
        }
    }

    /// Entity names this item mentions.
    pub fn mentions(&self) -> Vec<&str> {
        match self {
            Self::Entity(e) => vec![e.name.as_str()],
            Self::Relationship(r) => vec![r.parent.as_str(), r.child.as_str()],
            Self::SubjectArea(s) => s.entities.iter().map(String::as_str).collect(),
            Self::BusinessRule(b) => b.entities.iter().map(String::as_str).collect(),
        }
    }
}

impl EntityItem {
    fn from_document(doc: &Document) -> Self {
        let attributes = list_or_section(doc, keys::ATTRIBUTES, Section::Attributes);
        let rules = list_or_section(doc, keys::BUSINESS_RULES, Section::BusinessRules);
        Self {
            name: doc.display_name(),
            business_name: owned(doc.meta_str(keys::BUSINESS_NAME)),
            subject_area: owned(doc.meta_str(keys::SUBJECT_AREA)),
            description: description(doc),
            attribute_total: total(doc, keys::ATTRIBUTE_COUNT, attributes.len()),
            rule_total: total(doc, keys::RULE_COUNT, rules.len()),
            attributes,
            rules,
        }
    }
}

impl RelationshipItem {
    fn from_document(doc: &Document) -> Self {
        Self {
            name: owned(doc.meta_str(keys::RELATIONSHIP_NAME)),
            parent: doc.meta_str(keys::PARENT_ENTITY).unwrap_or_default().to_string(),
            child: doc.meta_str(keys::CHILD_ENTITY).unwrap_or_default().to_string(),
            relationship_type: owned(doc.meta_str(keys::RELATIONSHIP_TYPE)),
            description: description(doc),
        }
    }
}

impl SubjectAreaItem {
    fn from_document(doc: &Document) -> Self {
        let entities = list_or_section(doc, keys::ENTITIES, Section::SubjectAreaEntities);
        Self {
            name: doc.display_name(),
            description: description(doc),
            entity_total: total(doc, keys::ENTITY_COUNT, entities.len()),
            entities,
            total_attributes: count(doc, keys::TOTAL_ATTRIBUTES),
            total_rules: count(doc, keys::TOTAL_RULES),
        }
    }
}

impl BusinessRuleItem {
    fn from_document(doc: &Document) -> Self {
        let entities = match doc.meta_list(keys::ENTITIES) {
            Some(list) if !list.is_empty() => list.to_vec(),
            _ => doc
                .meta_str(keys::ENTITY_NAME)
                .map(|name| vec![name.to_string()])
                .unwrap_or_default(),
        };
        let rule = doc
            .meta_str(keys::RULE_TEXT)
            .map(str::to_string)
            .or_else(|| description(doc))
            .unwrap_or_else(|| doc.text.trim().to_string());
        Self {
            name: owned(doc.meta_str(keys::RULE_NAME)),
            rule,
            entities,
        }
    }
}

fn owned(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn description(doc: &Document) -> Option<String> {
    owned(doc.meta_str(keys::DESCRIPTION)).or_else(|| sections::description(&doc.text))
}

fn list_or_section(doc: &Document, key: &str, section: Section) -> Vec<String> {
    match doc.meta_list(key) {
        Some(list) if !list.is_empty() => list.to_vec(),
        _ => sections::bullets(&doc.text, section),
    }
}

fn count(doc: &Document, key: &str) -> Option<usize> {
    doc.meta_f64(key)
        .filter(|n| n.is_finite() && *n >= 0.0)
        .map(|n| n as usize)
}

/// A stored count can exceed the listed items (lists may be abbreviated)
/// but never undercut them.
fn total(doc: &Document, key: &str, listed: usize) -> usize {
    count(doc, key).map_or(listed, |n| n.max(listed))
}
