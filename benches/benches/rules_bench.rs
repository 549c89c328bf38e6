//! # Rule Encoding Benchmarks
//!
//! Measures textual parsing and builder encoding of the same rule base.
//!
//! Run: `cargo bench --bench rules_bench`

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use fis_rules::{NameTable, Rule, RuleSet, is, is_not, parse_rules};

const SOURCE: &str = "
    IF service IS poor OR food IS rancid THEN tip IS cheap
    IF service IS good THEN tip IS average
    IF service IS excellent OR food IS delicious THEN tip IS generous
    IF service IS NOT poor AND food IS NOT rancid THEN tip IS NOT cheap
";

fn names() -> NameTable {
    let mut names = NameTable::new();
    names
        .add_input("service", 0)
        .add_input("food", 1)
        .add_input_term(0, "poor", 0)
        .add_input_term(0, "good", 1)
        .add_input_term(0, "excellent", 2)
        .add_input_term(1, "rancid", 3)
        .add_input_term(1, "delicious", 4);
    names
        .add_output("tip", 0)
        .add_output_term(0, "cheap", 0)
        .add_output_term(0, "average", 1)
        .add_output_term(0, "generous", 2);
    names
}

fn bench_parse(c: &mut Criterion) {
    let names = names();
    c.bench_function("parse_rules", |b| {
        b.iter(|| {
            let rules = parse_rules(black_box(SOURCE), &names).unwrap();
            black_box(RuleSet::<i16>::encode(&rules).unwrap())
        })
    });
}

fn bench_builder(c: &mut Criterion) {
    c.bench_function("builder_encode", |b| {
        b.iter(|| {
            black_box(
                RuleSet::builder()
                    .rule(Rule::when(0, is(0)).or(1, is(3)).then(0, is(0)))
                    .rule(Rule::when(0, is(1)).then(0, is(1)))
                    .rule(Rule::when(0, is(2)).or(1, is(4)).then(0, is(2)))
                    .rule(Rule::when(0, is_not(0)).and(1, is_not(3)).then(0, is_not(0)))
                    .build::<i16>()
                    .unwrap(),
            )
        })
    });
}

criterion_group!(benches, bench_parse, bench_builder);
criterion_main!(benches);
