use criterion::{Criterion, criterion_group, criterion_main};
use serde_json::Value;
use std::hint::black_box;

use value_hunter::walk::walk;
use value_hunter::{MatchContext, NormalizerConfig, normalize, normalize_batch, normalize_json};

fn arsenal_chelsea() -> MatchContext {
    MatchContext::new("Arsenal", "Chelsea")
}

fn bench_normalize_json(c: &mut Criterion) {
    let ctx = arsenal_chelsea();
    let config = NormalizerConfig::default();
    c.bench_function("normalize_json", |b| {
        b.iter(|| {
            let out = normalize_json(black_box(FOOTYSTATS_JSON), &ctx, &config).unwrap();
            black_box(out.home_team.name.len());
        })
    });
}

fn bench_tree_walk(c: &mut Criterion) {
    let root: Value = serde_json::from_str(FOOTYSTATS_JSON).expect("valid fixture json");
    let ctx = arsenal_chelsea();
    c.bench_function("tree_walk", |b| {
        b.iter(|| {
            let found = walk(black_box(&root), &ctx);
            black_box(found.home.len());
        })
    });
}

fn bench_previous_matches(c: &mut Criterion) {
    let root: Value = serde_json::from_str(PREVIOUS_MATCHES_JSON).expect("valid fixture json");
    let ctx = MatchContext::new("Real Madrid", "Barcelona");
    let config = NormalizerConfig::default();
    c.bench_function("previous_matches_normalize", |b| {
        b.iter(|| {
            let out = normalize(black_box(&root), &ctx, &config);
            black_box(out.issues.len());
        })
    });
}

fn bench_batch(c: &mut Criterion) {
    let root: Value = serde_json::from_str(FOOTYSTATS_JSON).expect("valid fixture json");
    let jobs: Vec<(Value, MatchContext)> = (0..64)
        .map(|_| (root.clone(), arsenal_chelsea()))
        .collect();
    let config = NormalizerConfig::default();
    c.bench_function("normalize_batch_64", |b| {
        b.iter(|| {
            let out = normalize_batch(black_box(&jobs), &config);
            black_box(out.len());
        })
    });
}

criterion_group!(
    perf,
    bench_normalize_json,
    bench_tree_walk,
    bench_previous_matches,
    bench_batch
);
criterion_main!(perf);

static FOOTYSTATS_JSON: &str = include_str!("../tests/fixtures/footystats_match.json");
static PREVIOUS_MATCHES_JSON: &str = include_str!("../tests/fixtures/previous_matches.json");
