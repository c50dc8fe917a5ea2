//! Criterion benchmarks for taxon-analysis.
//!
//! - Ranking 8 schemes over 1K items
//! - Full classification of 1K items under 8 schemes, parallel and sequential

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use taxon_analysis::{Classifier, FitnessCalculator};
use taxon_core::config::TaxonConfig;
use taxon_core::events::EventDispatcher;
use taxon_core::types::{Scheme, Universe, UniverseBuilder};

/// Helper: `items` items spread over `schemes` schemes of 2..=9 categories.
/// Each scheme leaves a different tenth of the items unclassified.
fn make_bench_universe(items: usize, schemes: usize) -> Universe {
    let mut builder = UniverseBuilder::new();
    for i in 0..items {
        builder
            .add_item(format!("item-{i}"), (i % 37 + 1) as u64)
            .unwrap();
    }
    for s in 0..schemes {
        let scheme = format!("scheme-{s}");
        let categories = s % 8 + 2;
        for i in 0..items {
            if s > 0 && i % 10 == s % 10 {
                continue;
            }
            let category = format!("cat-{}", (i * (s + 3)) % categories);
            builder
                .add_membership(&scheme, &category, &format!("item-{i}"))
                .unwrap();
        }
    }
    builder.build().unwrap()
}

fn bench_rank(c: &mut Criterion) {
    let universe = make_bench_universe(1_000, 8);
    let population = universe.all_items();
    let schemes: Vec<&Scheme> = universe.schemes().iter().collect();
    let calculator = FitnessCalculator::with_defaults();

    c.bench_function("rank_8_schemes_1k_items", |bench| {
        bench.iter(|| {
            let ranked = calculator
                .rank(black_box(&schemes), &universe, &population)
                .unwrap();
            black_box(ranked);
        });
    });
}

fn bench_classify(c: &mut Criterion) {
    let universe = make_bench_universe(1_000, 8);
    let dispatcher = EventDispatcher::new();

    let parallel = Classifier::with_defaults(&universe);
    c.bench_function("classify_1k_items_parallel", |bench| {
        bench.iter(|| black_box(parallel.classify(&dispatcher).unwrap()));
    });

    let config = TaxonConfig::from_toml("[fitness]\nparallel = false\n").unwrap();
    let sequential = Classifier::new(&universe, &config).unwrap();
    c.bench_function("classify_1k_items_sequential", |bench| {
        bench.iter(|| black_box(sequential.classify(&dispatcher).unwrap()));
    });
}

criterion_group!(benches, bench_rank, bench_classify);
criterion_main!(benches);
