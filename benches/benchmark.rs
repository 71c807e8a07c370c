// Performance benchmarks for index population and relevance ranking
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use relevant_core::{ContentIndex, ContentItem, RelevanceEngine, RelevanceQuery, Term};

const TERM_POOL: u64 = 200;
const TERMS_PER_ITEM: usize = 6;

fn generate_item(id: u64, rng: &mut impl Rng) -> ContentItem {
    let terms: Vec<u64> = (0..TERMS_PER_ITEM)
        .map(|_| rng.random_range(1..=TERM_POOL))
        .collect();
    ContentItem::new(id, "article", 1_700_000_000 + id as i64).with_terms(terms)
}

fn build_index(size: u64) -> ContentIndex {
    let mut rng = rand::rng();
    let index = ContentIndex::new();
    for term in 1..=TERM_POOL {
        index.upsert_term(Term::new(term, "topics"));
    }
    for id in 1..=size {
        index.upsert(generate_item(id, &mut rng));
    }
    index
}

fn benchmark_upsert(c: &mut Criterion) {
    let mut group = c.benchmark_group("upsert");

    for size in [100u64, 1_000, 10_000].iter() {
        group.bench_with_input(BenchmarkId::new("relevant", size), size, |b, &size| {
            b.iter(|| {
                let index = build_index(size);
                black_box(index.count())
            });
        });
    }

    group.finish();
}

fn benchmark_rank(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank");

    for size in [1_000u64, 10_000, 100_000].iter() {
        let index = build_index(*size);
        let engine = RelevanceEngine::new(&index);

        group.bench_with_input(BenchmarkId::new("relevant", size), size, |b, _| {
            b.iter(|| {
                let query = RelevanceQuery::new(1).max_results(5);
                black_box(engine.execute(&query))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_upsert, benchmark_rank);
criterion_main!(benches);
