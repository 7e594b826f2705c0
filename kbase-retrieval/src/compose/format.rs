//! One answer strategy per content type. Each is a pure function of the
//! item it renders.

use std::fmt::Write as _;

use super::item::{BusinessRuleItem, EntityItem, KnowledgeItem, RelationshipItem, SubjectAreaItem};

/// Render the answer body for the top-ranked item.
pub fn render(item: &KnowledgeItem, sample_size: usize) -> String {
    match item {
        KnowledgeItem::Entity(e) => entity(e, sample_size),
        KnowledgeItem::Relationship(r) => relationship(r),
        KnowledgeItem::SubjectArea(s) => subject_area(s),
        KnowledgeItem::BusinessRule(b) => business_rule(b),
    }
}

/// Trailing relevance line, three decimals.
pub fn relevance_line(confidence: f64) -> String {
    format!("Relevance: {confidence:.3}")
}

/// One line describing a secondary match.
pub fn related_line(item: &KnowledgeItem) -> String {
    match item {
        KnowledgeItem::Entity(e) => match &e.subject_area {
            Some(area) => format!("• {} entity ({area})", e.name),
            None => format!("• {} entity", e.name),
        },
        KnowledgeItem::Relationship(r) => {
            let label = r
                .name
                .clone()
                .unwrap_or_else(|| format!("{} → {}", r.parent, r.child));
            match &r.relationship_type {
                Some(kind) => format!("• {label} ({kind} relationship)"),
                None => format!("• {label} (relationship)"),
            }
        }
        KnowledgeItem::SubjectArea(s) => format!("• {} subject area", s.name),
        KnowledgeItem::BusinessRule(b) => {
            let label = b.name.clone().unwrap_or_else(|| b.rule.clone());
            if b.entities.is_empty() {
                format!("• Rule: {label}")
            } else {
                format!("• Rule for {}: {label}", b.entities.join(", "))
            }
        }
    }
}

fn entity(e: &EntityItem, sample_size: usize) -> String {
    let mut out = match &e.subject_area {
        Some(area) => format!("**{}** is an entity in the {area} subject area.", e.name),
        None => format!("**{}** is an entity.", e.name),
    };
    if let Some(business) = e.business_name.as_ref().filter(|b| **b != e.name) {
        let _ = write!(out, "\nBusiness name: {business}");
    }
    if let Some(desc) = &e.description {
        let _ = write!(out, "\n\n{desc}");
    }
    if e.attribute_total > 0 {
        let _ = write!(out, "\n\nAttributes ({}):", e.attribute_total);
        push_sample(&mut out, &e.attributes, e.attribute_total, sample_size);
    }
    if e.rule_total > 0 {
        let _ = write!(out, "\n\nBusiness rules ({}):", e.rule_total);
        push_sample(&mut out, &e.rules, e.rule_total, sample_size);
    }
    out
}

fn relationship(r: &RelationshipItem) -> String {
    let mut out = match (&r.name, &r.relationship_type) {
        (Some(name), Some(kind)) => format!("**{name}** is a {kind} relationship."),
        (Some(name), None) => format!("**{name}** is a relationship."),
        (None, Some(kind)) => format!("A {kind} relationship."),
        (None, None) => "A relationship.".to_string(),
    };
    let _ = write!(out, "\nConnection: {} → {}", r.parent, r.child);
    let _ = write!(out, "\nParent entity: {}", r.parent);
    let _ = write!(out, "\nChild entity: {}", r.child);
    if let Some(kind) = &r.relationship_type {
        let _ = write!(out, "\nType: {kind}");
    }
    if let Some(desc) = &r.description {
        let _ = write!(out, "\n\n{desc}");
    }
    out
}

fn subject_area(s: &SubjectAreaItem) -> String {
    let mut out = format!(
        "**{}** is a subject area containing {} {}.",
        s.name,
        s.entity_total,
        if s.entity_total == 1 { "entity" } else { "entities" }
    );
    match (s.total_attributes, s.total_rules) {
        (Some(attrs), Some(rules)) => {
            let _ = write!(out, "\nTotals: {attrs} attributes, {rules} business rules");
        }
        (Some(attrs), None) => {
            let _ = write!(out, "\nTotals: {attrs} attributes");
        }
        (None, Some(rules)) => {
            let _ = write!(out, "\nTotals: {rules} business rules");
        }
        (None, None) => {}
    }
    if let Some(desc) = &s.description {
        let _ = write!(out, "\n\n{desc}");
    }
    if !s.entities.is_empty() {
        out.push_str("\n\nEntities:");
        for name in &s.entities {
            let _ = write!(out, "\n• {name}");
        }
    }
    out
}

fn business_rule(b: &BusinessRuleItem) -> String {
    let mut out = match &b.name {
        Some(name) => format!("**{name}** business rule: {}", b.rule),
        None => format!("Business rule: {}", b.rule),
    };
    if !b.entities.is_empty() {
        let _ = write!(out, "\nApplies to: {}", b.entities.join(", "));
    }
    out
}

/// Up to `sample_size` items, then "+N more" for the rest of `total`.
fn push_sample(out: &mut String, items: &[String], total: usize, sample_size: usize) {
    for item in items.iter().take(sample_size) {
        let _ = write!(out, "\n• {item}");
    }
    let shown = items.len().min(sample_size);
    if total > shown {
        let _ = write!(out, "\n• +{} more", total - shown);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer(attributes: usize) -> EntityItem {
        EntityItem {
            name: "Customer".into(),
            business_name: Some("Customer".into()),
            subject_area: Some("Customer Management".into()),
            description: Some("Central customer record.".into()),
            attributes: (0..attributes).map(|i| format!("attr_{i}")).collect(),
            attribute_total: attributes,
            rules: vec!["Emails are unique".into()],
            rule_total: 1,
        }
    }

    #[test]
    fn entity_lists_sample_and_overflow() {
        let text = entity(&customer(7), 5);
        assert!(text.starts_with("**Customer** is an entity in the Customer Management subject area."));
        assert!(text.contains("Attributes (7):"));
        assert!(text.contains("• attr_4"));
        assert!(!text.contains("• attr_5"));
        assert!(text.contains("• +2 more"));
        assert!(text.contains("Business rules (1):\n• Emails are unique"));
        // Same business name as entity name is not repeated.
        assert!(!text.contains("Business name:"));
    }

    #[test]
    fn entity_without_overflow_has_no_more_line() {
        let text = entity(&customer(3), 5);
        assert!(!text.contains("more"));
    }

    #[test]
    fn relationship_names_both_ends_and_type() {
        let text = relationship(&RelationshipItem {
            name: Some("Customer_Places_Orders".into()),
            parent: "Customer".into(),
            child: "Order".into(),
            relationship_type: Some("One-to-Many".into()),
            description: Some("Customers can place multiple orders".into()),
        });
        assert!(text.starts_with("**Customer_Places_Orders** is a One-to-Many relationship."));
        assert!(text.contains("Connection: Customer → Order"));
        assert!(text.contains("Customers can place multiple orders"));
    }

    #[test]
    fn subject_area_lists_every_entity() {
        let text = subject_area(&SubjectAreaItem {
            name: "Sales".into(),
            description: None,
            entities: vec!["Order".into(), "OrderItem".into()],
            entity_total: 2,
            total_attributes: Some(30),
            total_rules: None,
        });
        assert!(text.starts_with("**Sales** is a subject area containing 2 entities."));
        assert!(text.contains("Totals: 30 attributes"));
        assert!(text.ends_with("• Order\n• OrderItem"));
    }

    #[test]
    fn relevance_has_three_decimals() {
        assert_eq!(relevance_line(0.83333), "Relevance: 0.833");
        assert_eq!(relevance_line(1.0), "Relevance: 1.000");
    }
}
