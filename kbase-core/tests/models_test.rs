use std::sync::Arc;

use kbase_core::document::keys;
use kbase_core::models::TierThresholds;
use kbase_core::*;

fn customer() -> Document {
    Document::new("entity_customer", ContentType::Entity, "Entity: Customer", vec![1.0, 0.0])
        .with_metadata(keys::ENTITY_NAME, "Customer")
        .with_metadata(keys::SUBJECT_AREA, "Customer Management")
        .with_metadata(keys::ATTRIBUTE_COUNT, 27usize)
}

#[test]
fn filter_matches_on_all_clauses() {
    let doc = customer();
    let filter = MetadataFilter::new()
        .content_type(ContentType::Entity)
        .where_eq(keys::SUBJECT_AREA, "Customer Management");
    assert!(filter.matches(&doc));

    let wrong_area = MetadataFilter::new().where_eq(keys::SUBJECT_AREA, "Finance");
    assert!(!wrong_area.matches(&doc));

    let wrong_type = MetadataFilter::new().content_type(ContentType::Relationship);
    assert!(!wrong_type.matches(&doc));
}

#[test]
fn filter_compares_numbers_and_text_strictly() {
    let doc = customer();
    assert!(MetadataFilter::new()
        .where_eq(keys::ATTRIBUTE_COUNT, 27usize)
        .matches(&doc));
    assert!(!MetadataFilter::new()
        .where_eq(keys::ATTRIBUTE_COUNT, "27")
        .matches(&doc));
    assert!(!MetadataFilter::new()
        .where_eq("missing", "x")
        .matches(&doc));
}

#[test]
fn empty_filter_matches_everything() {
    let filter = MetadataFilter::new();
    assert!(filter.is_empty());
    assert!(filter.matches(&customer()));
}

#[test]
fn query_result_derives_confidence_from_metric() {
    let r = QueryResult::new(Arc::new(customer()), 0.5, DistanceMetric::Cosine);
    assert!((r.confidence - 0.75).abs() < 1e-12);
}

#[test]
fn no_results_answer_shape() {
    let a = Answer::no_results();
    assert!(!a.succeeded);
    assert_eq!(a.confidence_tier, ConfidenceTier::None);
    assert!(a.sources.is_empty());
    assert!(a.confidence.is_none());
}

#[test]
fn source_serializes_type_field() {
    let s = Source {
        name: "Customer".into(),
        content_type: ContentType::SubjectArea,
        confidence: 0.5,
    };
    let v = serde_json::to_value(&s).unwrap();
    assert_eq!(v["type"], "subject_area");
    assert_eq!(v["name"], "Customer");
}

#[test]
fn metadata_values_deserialize_untagged() {
    let json = r#"{"entity_name": "Order", "attribute_count": 12, "attributes": ["order_id", "status"]}"#;
    let meta: Metadata = serde_json::from_str(json).unwrap();
    assert_eq!(meta["entity_name"].as_str(), Some("Order"));
    assert_eq!(meta["attribute_count"].as_f64(), Some(12.0));
    assert_eq!(meta["attributes"].as_list().map(|l| l.len()), Some(2));
}

#[test]
fn tier_thresholds_default_to_policy_constants() {
    let t = TierThresholds::default();
    assert_eq!(t.high, 0.3);
    assert_eq!(t.medium, 0.1);
}
