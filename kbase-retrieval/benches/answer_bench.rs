use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kbase_core::config::{ComposeConfig, RetrievalConfig};
use kbase_core::document::keys;
use kbase_core::traits::{IEmbeddingProvider, IVectorIndex};
use kbase_core::{ContentType, DistanceMetric, Document};
use kbase_embeddings::HashingProvider;
use kbase_index::InMemoryIndex;
use kbase_retrieval::RetrievalEngine;

const DIMS: usize = 128;

fn build_engine(cache_size: u64) -> RetrievalEngine {
    let provider = Arc::new(HashingProvider::new(DIMS));
    let index = Arc::new(InMemoryIndex::new(DIMS, DistanceMetric::Cosine));
    for i in 0..500 {
        let name = format!("Entity{i}");
        let text = format!("Entity: {name}\nSubject Area: Area{}\nDescription: record number {i}", i % 12);
        let embedding = provider.embed(&text).unwrap();
        index
            .insert(
                Document::new(format!("entity_{i}"), ContentType::Entity, text, embedding)
                    .with_metadata(keys::ENTITY_NAME, name)
                    .with_metadata(keys::SUBJECT_AREA, format!("Area{}", i % 12)),
            )
            .unwrap();
    }
    RetrievalEngine::new(
        provider,
        index,
        RetrievalConfig {
            answer_cache_size: cache_size,
            ..Default::default()
        },
        ComposeConfig::default(),
    )
    .unwrap()
}

fn bench_answer(c: &mut Criterion) {
    let uncached = build_engine(0);
    c.bench_function("answer_500_docs_uncached", |b| {
        b.iter(|| uncached.answer(black_box("Tell me about Entity42")).unwrap())
    });

    let cached = build_engine(1024);
    c.bench_function("answer_500_docs_cached", |b| {
        b.iter(|| cached.answer(black_box("Tell me about Entity42")).unwrap())
    });
}

criterion_group!(benches, bench_answer);
criterion_main!(benches);
