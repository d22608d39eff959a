//! Criterion benchmarks for whole-tick execution.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use railsim_bench::{reference_profile, stress_profile};
use railsim_engine::Simulation;
use railsim_test_utils::MinRandom;

/// Warm the network up so most trains are admitted and cycling.
fn warmed(mut sim: Simulation, ticks: usize) -> Simulation {
    for _ in 0..ticks {
        sim.step();
    }
    sim
}

fn bench_reference_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("reference_tick");
    for workers in [1usize, 2, 4] {
        group.bench_with_input(BenchmarkId::from_parameter(workers), &workers, |b, &w| {
            let mut sim = warmed(Simulation::new(reference_profile(42, w)).unwrap(), 64);
            b.iter(|| black_box(sim.step()));
        });
    }
    group.finish();
}

fn bench_reference_tick_fixed_dwell(c: &mut Criterion) {
    c.bench_function("reference_tick_min_dwell", |b| {
        let sim = Simulation::with_random(reference_profile(42, 1), Box::new(MinRandom)).unwrap();
        let mut sim = warmed(sim, 64);
        b.iter(|| black_box(sim.step()));
    });
}

fn bench_stress_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("stress_tick");
    group.sample_size(20);
    for workers in [1usize, 4, 8] {
        group.bench_with_input(BenchmarkId::from_parameter(workers), &workers, |b, &w| {
            let mut sim = warmed(Simulation::new(stress_profile(7, w)).unwrap(), 256);
            b.iter(|| black_box(sim.step()));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_reference_tick,
    bench_reference_tick_fixed_dwell,
    bench_stress_tick
);
criterion_main!(benches);
