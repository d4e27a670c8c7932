use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use probably_models::alarm::{conditioned, event_conditioned, joint_filtered, paired, Evidence};

fn evidence() -> Vec<Evidence> {
    vec![
        Evidence::default(),
        Evidence::calls(),
        Evidence {
            earthquake: Some(false),
            alarm: Some(true),
            ..Evidence::calls()
        },
    ]
}

fn joint_then_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("joint_filtered");
    for (num, ev) in evidence().iter().enumerate() {
        group.bench_with_input(BenchmarkId::from_parameter(num), ev, |b, ev| {
            b.iter(|| joint_filtered(black_box(ev), |w| w.burglary).unwrap());
        });
    }
    group.finish();
}

fn direct_exclusion(c: &mut Criterion) {
    let mut group = c.benchmark_group("paired");
    for (num, ev) in evidence().iter().enumerate() {
        group.bench_with_input(BenchmarkId::from_parameter(num), ev, |b, ev| {
            b.iter(|| paired(black_box(ev), |w| w.burglary).unwrap());
        });
    }
    group.finish();
}

fn condition_each_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("conditioned");
    for (num, ev) in evidence().iter().enumerate() {
        group.bench_with_input(BenchmarkId::from_parameter(num), ev, |b, ev| {
            b.iter(|| conditioned(black_box(ev), |w| w.burglary).unwrap());
        });
    }
    group.finish();
}

fn event_predicates(c: &mut Criterion) {
    let mut group = c.benchmark_group("event_conditioned");
    for (num, ev) in evidence().iter().enumerate() {
        group.bench_with_input(BenchmarkId::from_parameter(num), ev, |b, ev| {
            b.iter(|| event_conditioned(black_box(ev), |w| w.burglary).unwrap());
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    joint_then_filter,
    direct_exclusion,
    condition_each_step,
    event_predicates
);
criterion_main!(benches);
