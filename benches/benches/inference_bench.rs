//! # Inference Benchmarks
//!
//! Measures one full evaluation cycle (fuzzify, inference, defuzzify) and the
//! inference step alone, for each inference style.
//!
//! Run: `cargo bench --bench inference_bench`

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use fis_core::{Fis, FisType, Io, MfSide, Parameter, ShapeKind};
use fis_rules::{Rule, RuleSet, is};

const INPUTS: [f32; 2] = [6.5, 3.0];

/// Three-term tipping system with the given consequent shapes
fn tipping(kind: FisType) -> (Fis, RuleSet<i16>) {
    let mut fis = Fis::setup(
        kind,
        vec![Io::new(0.0, 10.0).unwrap(), Io::new(0.0, 10.0).unwrap()],
        vec![Io::new(0.0, 30.0).unwrap()],
        3,
        3,
    )
    .unwrap();

    let tri = ShapeKind::Triangular;
    fis.set_membership_function(MfSide::Input, 0, 0, tri, &[0.0, 0.0, 5.0], 1.0).unwrap();
    fis.set_membership_function(MfSide::Input, 0, 1, tri, &[0.0, 5.0, 10.0], 1.0).unwrap();
    fis.set_membership_function(MfSide::Input, 0, 2, tri, &[5.0, 10.0, 10.0], 1.0).unwrap();

    let outputs: [(ShapeKind, Vec<f32>); 3] = match kind {
        FisType::Mamdani => [
            (tri, vec![0.0, 5.0, 10.0]),
            (tri, vec![10.0, 15.0, 20.0]),
            (tri, vec![20.0, 25.0, 30.0]),
        ],
        FisType::Sugeno => [
            (ShapeKind::Constant, vec![5.0]),
            (ShapeKind::Linear, vec![1.0, 0.5, 10.0]),
            (ShapeKind::Constant, vec![25.0]),
        ],
        FisType::Tsukamoto => [
            (ShapeKind::TLinearZ, vec![0.0, 10.0]),
            (ShapeKind::TSigmoid, vec![1.0, 15.0]),
            (ShapeKind::TLinearS, vec![20.0, 30.0]),
        ],
    };
    for (mf, (shape, coefficients)) in outputs.into_iter().enumerate() {
        fis.set_membership_function(MfSide::Output, 0, mf, shape, &coefficients, 1.0)
            .unwrap();
    }

    let rules = RuleSet::builder()
        .rule(Rule::when(0, is(0)).then(0, is(0)))
        .rule(Rule::when(0, is(1)).then(0, is(1)))
        .rule(Rule::when(0, is(2)).then(0, is(2)))
        .build::<i16>()
        .unwrap();

    (fis, rules)
}

fn bench_full_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_cycle");

    for kind in [FisType::Mamdani, FisType::Sugeno, FisType::Tsukamoto] {
        let (mut fis, rules) = tipping(kind);
        group.bench_function(BenchmarkId::new("tipping", format!("{:?}", kind)), |b| {
            b.iter(|| {
                fis.evaluate(rules.tokens(), black_box(&INPUTS[..])).unwrap();
                black_box(fis.get_output(0).unwrap())
            })
        });
    }

    group.finish();
}

fn bench_inference_only(c: &mut Criterion) {
    let mut group = c.benchmark_group("run_inference");

    let (mut fis, rules) = tipping(FisType::Mamdani);
    fis.set_input(0, 6.5).unwrap();
    fis.fuzzify().unwrap();

    group.bench_function("three_rules", |b| {
        b.iter(|| black_box(fis.run_inference(black_box(rules.tokens())).unwrap()))
    });

    group.finish();
}

fn bench_eval_points(c: &mut Criterion) {
    let mut group = c.benchmark_group("mamdani_eval_points");

    for points in [20usize, 100, 500, 1000] {
        let (mut fis, rules) = tipping(FisType::Mamdani);
        fis.set_parameter(Parameter::EvalPoints(points)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(points), &points, |b, _| {
            b.iter(|| {
                fis.evaluate(rules.tokens(), black_box(&INPUTS[..])).unwrap();
                black_box(fis.get_output(0).unwrap())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_full_cycle, bench_inference_only, bench_eval_points);
criterion_main!(benches);
