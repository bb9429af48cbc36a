//! Benchmark for tree construction, indexing and encoding
//!
//! Covers a wide rule set (many comparisons per scope) and a deep one
//! (one extra scope per comparison).

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use logic_tree_core::condition::Condition;
use logic_tree_core::config::ParserConfig;
use logic_tree_core::tree::{assign_bounds, build_tree, flatten_tree};
use logic_tree_core::{encode_conditions, encode_rows};

/// `groups` OR-scopes of `per_group` comparisons, joined by AND
fn wide_tokens(groups: usize, per_group: usize) -> Vec<Condition> {
    let mut tokens = vec![Condition::open()];
    for g in 0..groups {
        if g != 0 {
            tokens.push(Condition::logic("AND"));
        }
        tokens.push(Condition::open());
        for i in 0..per_group {
            if i != 0 {
                tokens.push(Condition::logic("OR"));
            }
            tokens.push(Condition::equality(
                format!("field{}", g),
                "eq",
                i.to_string(),
            ));
        }
        tokens.push(Condition::close());
    }
    tokens.push(Condition::close());
    tokens
}

/// `( a AND ( b OR ( c AND ... ) ) )` nested `depth` levels
fn deep_tokens(depth: usize) -> Vec<Condition> {
    let mut tokens = Vec::with_capacity(depth * 4);
    for d in 0..depth {
        tokens.push(Condition::open());
        tokens.push(Condition::equality("level", "eq", d.to_string()));
        tokens.push(Condition::logic(if d % 2 == 0 { "AND" } else { "OR" }));
    }
    tokens.push(Condition::equality("level", "eq", "leaf"));
    for _ in 0..depth {
        tokens.push(Condition::close());
    }
    tokens
}

fn benchmark_build(c: &mut Criterion) {
    let wide = wide_tokens(50, 20);
    let deep = deep_tokens(200);

    c.bench_function("build_tree_wide", |b| {
        b.iter(|| build_tree(black_box(&wide)))
    });

    c.bench_function("build_tree_deep", |b| {
        b.iter(|| build_tree(black_box(&deep)))
    });
}

fn benchmark_index_and_encode(c: &mut Criterion) {
    let tree = build_tree(&wide_tokens(50, 20)).unwrap_or_else(|e| panic!("{}", e));

    c.bench_function("assign_bounds_wide", |b| {
        b.iter_batched(
            || tree.clone(),
            |mut tree| assign_bounds(black_box(&mut tree)),
            criterion::BatchSize::SmallInput,
        )
    });

    let mut indexed = tree.clone();
    assign_bounds(&mut indexed);

    c.bench_function("encode_rows_wide", |b| {
        b.iter(|| encode_rows(black_box(&indexed)))
    });

    c.bench_function("flatten_tree_wide", |b| {
        b.iter(|| flatten_tree(black_box(&indexed)))
    });
}

fn benchmark_pipeline(c: &mut Criterion) {
    let wide = wide_tokens(50, 20);
    let config = ParserConfig::strict();

    c.bench_function("encode_conditions_wide_strict", |b| {
        b.iter(|| encode_conditions(black_box(&wide), &config))
    });
}

criterion_group!(
    benches,
    benchmark_build,
    benchmark_index_and_encode,
    benchmark_pipeline
);
criterion_main!(benches);
