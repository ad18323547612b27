//! Throughput/latency benchmarks for `fw-core`, shaped after the original
//! collaborator's benchmark script: firewall construction at increasing
//! sizes, a dry-run verify against the zero-point property, and verify
//! latency against randomly generated properties.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fw_core::{Action, Engine, Range, Rule, DIMENSIONS};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_range(rng: &mut StdRng) -> Range {
    let lo = rng.random_range(0..=u32::MAX - 1);
    let hi = rng.random_range(lo..=u32::MAX);
    Range::new(lo, hi)
}

fn random_rule(rng: &mut StdRng) -> Rule {
    let ranges = std::array::from_fn(|_| random_range(rng));
    let action = if rng.random_bool(0.5) {
        Action::ACCEPT
    } else {
        Action::DROP
    };
    Rule::new(ranges, action)
}

fn firewall_with(rng: &mut StdRng, size: usize) -> Engine {
    let mut engine = Engine::new();
    for _ in 0..size {
        engine.add(random_rule(rng)).unwrap();
    }
    engine
}

fn bench_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("add");
    for size in [1_000usize, 10_000, 100_000] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                let mut rng = StdRng::seed_from_u64(7);
                black_box(firewall_with(&mut rng, size));
            });
        });
    }
    group.finish();
}

fn bench_verify_dry_run(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(11);
    let mut engine = firewall_with(&mut rng, 100_000);
    let zero_point = Rule::new(
        [Range::new(0, 0); DIMENSIONS],
        Action::DROP,
    );
    c.bench_function("verify_dry_run_100k_rules", |b| {
        b.iter(|| black_box(engine.verify(&zero_point)));
    });
}

fn bench_verify_random_properties(c: &mut Criterion) {
    let mut build_rng = StdRng::seed_from_u64(13);
    let mut engine = firewall_with(&mut build_rng, 100_000);
    let mut prop_rng = StdRng::seed_from_u64(17);
    c.bench_function("verify_random_property_100k_rules", |b| {
        b.iter(|| {
            let property = random_rule(&mut prop_rng);
            black_box(engine.verify(&property));
        });
    });
}

criterion_group!(
    benches,
    bench_add,
    bench_verify_dry_run,
    bench_verify_random_properties
);
criterion_main!(benches);
