//! # Defuzzification Benchmarks
//!
//! Compares the sampled Mamdani methods over the same aggregated curve.
//!
//! Run: `cargo bench --bench defuzz_bench`

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use fis_core::defuzz::Samples;
use fis_core::DefuzzMethod;

/// Two clipped triangles, sampled over [0, 30]
fn curve(points: usize) -> Vec<f32> {
    let res = 30.0 / points as f32;
    (0..=points)
        .map(|k| {
            let x = res * k as f32;
            let left = (1.0 - (x - 8.0).abs() / 5.0).clamp(0.0, 0.4);
            let right = (1.0 - (x - 20.0).abs() / 6.0).clamp(0.0, 0.9);
            left.max(right)
        })
        .collect()
}

fn bench_methods(c: &mut Criterion) {
    let mut group = c.benchmark_group("defuzz_methods");
    let ys = curve(100);
    let samples = Samples {
        ys: &ys,
        x0: 0.0,
        res: 0.3,
    };

    for method in [
        DefuzzMethod::Centroid,
        DefuzzMethod::Bisector,
        DefuzzMethod::Mom,
        DefuzzMethod::Lom,
        DefuzzMethod::Som,
    ] {
        group.bench_function(format!("{:?}", method), |b| {
            b.iter(|| black_box(method.apply_sampled(black_box(&samples))))
        });
    }

    group.finish();
}

fn bench_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("centroid_vs_bisector");

    for points in [20usize, 100, 1000] {
        let ys = curve(points);
        let samples = Samples {
            ys: &ys,
            x0: 0.0,
            res: 30.0 / points as f32,
        };
        group.bench_with_input(BenchmarkId::new("centroid", points), &samples, |b, s| {
            b.iter(|| black_box(DefuzzMethod::Centroid.apply_sampled(s)))
        });
        group.bench_with_input(BenchmarkId::new("bisector", points), &samples, |b, s| {
            b.iter(|| black_box(DefuzzMethod::Bisector.apply_sampled(s)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_methods, bench_resolution);
criterion_main!(benches);
