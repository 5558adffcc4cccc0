//! Criterion benchmarks for insertion and search.
//!
//! # Usage
//! ```bash
//! cargo bench --package hnsw-index
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hnsw_index::{HnswIndex, IndexConfig};

const DIM: usize = 128;

fn vector(seed: usize) -> Vec<f32> {
    (0..DIM)
        .map(|d| ((seed * 31 + d * 17) as f32 * 0.013).sin())
        .collect()
}

fn populated(n: usize) -> HnswIndex {
    let mut index = HnswIndex::create(IndexConfig::new(DIM, n)).expect("index creation");
    for i in 0..n {
        let tag = if i % 2 == 0 { "even" } else { "odd" };
        index
            .add_point(&vector(i), i as i32, Some(tag.to_string()))
            .expect("add_point");
    }
    index
}

fn bench_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_point");
    for &n in &[1_000usize, 5_000] {
        let vectors: Vec<Vec<f32>> = (0..n).map(vector).collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let mut index =
                    HnswIndex::create(IndexConfig::new(DIM, n)).expect("index creation");
                for (i, v) in vectors.iter().enumerate() {
                    index.add_point(v, i as i32, None).expect("add_point");
                }
                black_box(index)
            });
        });
    }
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let index = populated(10_000);
    let query = vector(123_457);

    let mut group = c.benchmark_group("search_knn");
    for &k in &[1usize, 10, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(k), &k, |b, &k| {
            b.iter(|| black_box(index.search_knn(black_box(&query), k).expect("search")));
        });
    }
    group.finish();

    let mut group = c.benchmark_group("search_knn_filtered");
    group.bench_function("k10_even", |b| {
        b.iter(|| {
            black_box(
                index
                    .search_knn_filtered(black_box(&query), 10, |meta| meta == Some("even"))
                    .expect("search"),
            )
        });
    });
    group.finish();
}

fn bench_search_quality(c: &mut Criterion) {
    let mut index = populated(10_000);
    let query = vector(987_654);

    let mut group = c.benchmark_group("search_quality");
    for &ef in &[16usize, 64, 256] {
        index.set_search_quality(ef).expect("set_search_quality");
        group.bench_with_input(BenchmarkId::from_parameter(ef), &ef, |b, _| {
            b.iter(|| black_box(index.search_knn(black_box(&query), 10).expect("search")));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_add, bench_search, bench_search_quality);
criterion_main!(benches);
