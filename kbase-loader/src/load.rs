//! Embed drafts and insert them into an index.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info};

use kbase_core::errors::{EmbeddingError, KbaseResult};
use kbase_core::traits::{IEmbeddingProvider, IVectorIndex};
use kbase_core::ContentType;

use crate::documents::build_documents;
use crate::model::KnowledgeModel;

/// What a load inserted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadReport {
    pub model: String,
    pub total: usize,
    pub by_type: BTreeMap<ContentType, usize>,
}

impl LoadReport {
    fn record(&mut self, content_type: ContentType) {
        self.total += 1;
        *self.by_type.entry(content_type).or_default() += 1;
    }

    pub fn count_of(&self, content_type: ContentType) -> usize {
        self.by_type.get(&content_type).copied().unwrap_or(0)
    }
}

/// Build, embed (one batch), and insert every document for `model`.
///
/// Stops at the first embedding or insert error; documents inserted before
/// it stay in the index.
pub fn load_model(
    index: &dyn IVectorIndex,
    embedder: &dyn IEmbeddingProvider,
    model: &KnowledgeModel,
) -> KbaseResult<LoadReport> {
    let span = kbase_observability::load_span!(model.model_info.name);
    let _guard = span.enter();

    let drafts = build_documents(model);
    let texts: Vec<String> = drafts.iter().map(|d| d.text.clone()).collect();
    let embeddings = embedder.embed_batch(&texts)?;
    if embeddings.len() != drafts.len() {
        return Err(EmbeddingError::InferenceFailed {
            reason: format!(
                "provider returned {} embeddings for {} texts",
                embeddings.len(),
                drafts.len()
            ),
        }
        .into());
    }

    let mut report = LoadReport {
        model: model.model_info.name.clone(),
        ..Default::default()
    };
    for (draft, embedding) in drafts.into_iter().zip(embeddings) {
        let content_type = draft.content_type;
        debug!(id = %draft.id, content_type = %content_type, "inserting document");
        index.insert(draft.into_document(embedding))?;
        report.record(content_type);
    }

    info!(
        total = report.total,
        entities = report.count_of(ContentType::Entity),
        relationships = report.count_of(ContentType::Relationship),
        subject_areas = report.count_of(ContentType::SubjectArea),
        business_rules = report.count_of(ContentType::BusinessRule),
        "knowledge model loaded"
    );
    Ok(report)
}
