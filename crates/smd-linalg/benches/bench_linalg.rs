use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use faer::mat;
use glam::{DMat3, DVec3};
use smd_linalg::{svd::svd3, symmetric_eigen3};
use std::hint::black_box;

fn bench_svd3(c: &mut Criterion) {
    let mut group = c.benchmark_group("svd3");
    let a1 = DMat3::from_cols(
        DVec3::new(1.1, 0.0, 0.0),
        DVec3::new(0.45, 0.95, 0.0),
        DVec3::new(-0.2, 0.1, 1.02),
    );

    let a2 = mat![[1.1, 0.45, -0.2], [0.0, 0.95, 0.1], [0.0, 0.0, 1.02]];

    group.bench_function(BenchmarkId::new("svd3", ""), |b| {
        b.iter(|| black_box(svd3(black_box(&a1))))
    });

    group.bench_function(BenchmarkId::new("svd3_faer", ""), |b| {
        b.iter(|| black_box(a2.svd()))
    });
}

fn bench_symmetric_eigen3(c: &mut Criterion) {
    let mut group = c.benchmark_group("symmetric_eigen3");
    let s = DMat3::from_cols(
        DVec3::new(4.0, -2.0, 1.5),
        DVec3::new(-2.0, 0.25, 3.0),
        DVec3::new(1.5, 3.0, -6.0),
    );

    group.bench_function(BenchmarkId::new("jacobi", ""), |b| {
        b.iter(|| black_box(symmetric_eigen3(black_box(&s))))
    });
}

criterion_group!(benches, bench_svd3, bench_symmetric_eigen3);
criterion_main!(benches);
