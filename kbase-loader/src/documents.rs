//! Model → document drafts (text and metadata, not yet embedded).
//!
//! Four document kinds come out of one model: an entity document per
//! entity, a relationship document per relationship, one summary per
//! subject area, and one document per business rule.

use kbase_core::document::keys;
use kbase_core::{ContentType, Document, Metadata, MetadataValue};

use crate::model::{EntityDef, KnowledgeModel, RelationshipDef};

/// A document waiting for its embedding.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentDraft {
    pub id: String,
    pub content_type: ContentType,
    pub text: String,
    pub metadata: Metadata,
}

impl DocumentDraft {
    fn new(id: String, content_type: ContentType, text: String) -> Self {
        Self {
            id,
            content_type,
            text,
            metadata: Metadata::new(),
        }
    }

    fn meta(mut self, key: &str, value: impl Into<MetadataValue>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }

    pub fn into_document(self, embedding: Vec<f32>) -> Document {
        Document {
            id: self.id,
            embedding,
            text: self.text,
            content_type: self.content_type,
            metadata: self.metadata,
        }
    }
}

/// Every draft for `model`: entities, relationships, subject areas, then
/// business rules, each group in model order.
pub fn build_documents(model: &KnowledgeModel) -> Vec<DocumentDraft> {
    let mut drafts: Vec<DocumentDraft> = model.entities.iter().map(entity_draft).collect();
    drafts.extend(model.relationships.iter().map(relationship_draft));
    drafts.extend(
        group_by_subject_area(&model.entities)
            .into_iter()
            .map(|(area, members)| subject_area_draft(area, &members)),
    );
    drafts.extend(model.entities.iter().flat_map(rule_drafts));
    drafts
}

/// Lowercased, spaces to underscores.
pub fn slug(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

/// Collapse a multi-line description to one line.
fn one_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("• {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn entity_draft(entity: &EntityDef) -> DocumentDraft {
    let description = one_line(&entity.description);
    let text = format!(
        "Entity: {name}\n\
         Business Name: {business}\n\
         Subject Area: {area}\n\
         \n\
         Description: {description}\n\
         \n\
         Attributes ({attr_count} total):\n\
         {attributes}\n\
         \n\
         Business Rules ({rule_count} total):\n\
         {rules}",
        name = entity.name,
        business = entity.business_name(),
        area = entity.subject_area,
        attr_count = entity.attributes.len(),
        attributes = bullet_list(&entity.attributes),
        rule_count = entity.business_rules.len(),
        rules = bullet_list(&entity.business_rules),
    );

    DocumentDraft::new(
        format!("entity_{}", slug(&entity.name)),
        ContentType::Entity,
        text,
    )
    .meta(keys::ENTITY_NAME, entity.name.as_str())
    .meta(keys::BUSINESS_NAME, entity.business_name())
    .meta(keys::SUBJECT_AREA, entity.subject_area.as_str())
    .meta(keys::DESCRIPTION, description)
    .meta(keys::ATTRIBUTES, entity.attributes.clone())
    .meta(keys::BUSINESS_RULES, entity.business_rules.clone())
    .meta(keys::ATTRIBUTE_COUNT, entity.attributes.len())
    .meta(keys::RULE_COUNT, entity.business_rules.len())
}

fn relationship_draft(rel: &RelationshipDef) -> DocumentDraft {
    let description = one_line(&rel.description);
    let text = format!(
        "Relationship: {name}\n\
         Type: {kind}\n\
         Parent Entity: {parent}\n\
         Child Entity: {child}\n\
         \n\
         Description: {description}\n\
         \n\
         This relationship connects {parent} to {child} in a {kind} relationship.",
        name = rel.name,
        kind = rel.relationship_type,
        parent = rel.parent_entity,
        child = rel.child_entity,
    );

    DocumentDraft::new(
        format!("relationship_{}", slug(&rel.name)),
        ContentType::Relationship,
        text,
    )
    .meta(keys::RELATIONSHIP_NAME, rel.name.as_str())
    .meta(keys::PARENT_ENTITY, rel.parent_entity.as_str())
    .meta(keys::CHILD_ENTITY, rel.child_entity.as_str())
    .meta(keys::RELATIONSHIP_TYPE, rel.relationship_type.as_str())
    .meta(keys::DESCRIPTION, description)
}

/// Subject areas in order of first appearance. Entities without one are skipped.
fn group_by_subject_area(entities: &[EntityDef]) -> Vec<(&str, Vec<&EntityDef>)> {
    let mut groups: Vec<(&str, Vec<&EntityDef>)> = Vec::new();
    for entity in entities {
        let area = entity.subject_area.trim();
        if area.is_empty() {
            continue;
        }
        match groups.iter_mut().find(|(name, _)| *name == area) {
            Some((_, members)) => members.push(entity),
            None => groups.push((area, vec![entity])),
        }
    }
    groups
}

fn subject_area_draft(area: &str, members: &[&EntityDef]) -> DocumentDraft {
    let names: Vec<String> = members.iter().map(|e| e.name.clone()).collect();
    let total_attributes: usize = members.iter().map(|e| e.attributes.len()).sum();
    let total_rules: usize = members.iter().map(|e| e.business_rules.len()).sum();
    let overview = format!(
        "The {area} subject area contains {count} entities that work together to manage \
         and track information related to {lower} operations.",
        count = members.len(),
        lower = area.to_lowercase(),
    );
    let text = format!(
        "Subject Area: {area}\n\
         \n\
         Overview: {overview}\n\
         \n\
         Entities in this Subject Area:\n\
         {entities}\n\
         \n\
         Total Attributes: {total_attributes}\n\
         Total Business Rules: {total_rules}",
        entities = bullet_list(&names),
    );

    DocumentDraft::new(
        format!("subject_area_{}", slug(area)),
        ContentType::SubjectArea,
        text,
    )
    .meta(keys::SUBJECT_AREA, area)
    .meta(keys::DESCRIPTION, overview)
    .meta(keys::ENTITY_COUNT, members.len())
    .meta(keys::ENTITIES, names)
    .meta(keys::TOTAL_ATTRIBUTES, total_attributes)
    .meta(keys::TOTAL_RULES, total_rules)
}

fn rule_drafts(entity: &EntityDef) -> impl Iterator<Item = DocumentDraft> + '_ {
    let entity_slug = slug(&entity.name);
    entity
        .business_rules
        .iter()
        .enumerate()
        .map(move |(i, rule)| {
            let n = i + 1;
            let mut text = format!("Business Rule: {rule}\nEntity: {}", entity.name);
            if !entity.subject_area.trim().is_empty() {
                text.push_str(&format!("\nSubject Area: {}", entity.subject_area));
            }
            DocumentDraft::new(
                format!("rule_{entity_slug}_{n}"),
                ContentType::BusinessRule,
                text,
            )
            .meta(keys::ENTITY_NAME, entity.name.as_str())
            .meta(keys::RULE_NAME, format!("{} rule {n}", entity.name))
            .meta(keys::RULE_TEXT, rule.as_str())
            .meta(keys::SUBJECT_AREA, entity.subject_area.as_str())
        })
}
