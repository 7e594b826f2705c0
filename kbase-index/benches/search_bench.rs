use criterion::{black_box, criterion_group, criterion_main, Criterion};

use kbase_core::document::keys;
use kbase_core::traits::IVectorIndex;
use kbase_core::{ContentType, DistanceMetric, Document, MetadataFilter};
use kbase_index::InMemoryIndex;

const DIMS: usize = 384;

fn pseudo_embedding(seed: usize) -> Vec<f32> {
    (0..DIMS)
        .map(|i| (((seed * 31 + i * 17) % 97) as f32 / 97.0) - 0.5)
        .collect()
}

fn seeded_index(n: usize) -> InMemoryIndex {
    let index = InMemoryIndex::new(DIMS, DistanceMetric::Cosine);
    for i in 0..n {
        let area = if i % 2 == 0 { "Sales" } else { "Catalog" };
        let doc = Document::new(format!("e{i}"), ContentType::Entity, "", pseudo_embedding(i))
            .with_metadata(keys::ENTITY_NAME, format!("Entity{i}"))
            .with_metadata(keys::SUBJECT_AREA, area);
        index.insert(doc).expect("seed insert");
    }
    index
}

fn bench_search(c: &mut Criterion) {
    let index = seeded_index(2_000);
    let query = pseudo_embedding(4_242);
    let filter = MetadataFilter::new().where_eq(keys::SUBJECT_AREA, "Sales");

    c.bench_function("search_2000_top5", |b| {
        b.iter(|| index.search(black_box(&query), 5, None).unwrap())
    });

    c.bench_function("search_2000_top5_filtered", |b| {
        b.iter(|| index.search(black_box(&query), 5, Some(&filter)).unwrap())
    });
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
