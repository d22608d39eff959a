//! Criterion micro-benchmarks for the resource lock table.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use railsim_core::{Direction, LineId, LinkId, StationId, StationSide, TrainId};
use railsim_engine::{ResourceId, ResourceLockTable};

fn bench_acquire_release(c: &mut Criterion) {
    let table = ResourceLockTable::new(64, 128);
    let holder = TrainId::new(LineId(0), 0);
    let resource = ResourceId::Loading(StationSide::new(StationId(17), Direction::Backward));
    c.bench_function("lock_acquire_release", |b| {
        b.iter(|| {
            if let Some(handle) = table.try_acquire(black_box(resource), holder) {
                table.release(handle);
            }
        });
    });
}

fn bench_contended_acquire(c: &mut Criterion) {
    let table = ResourceLockTable::new(64, 128);
    let resource = ResourceId::Link(LinkId(5));
    let _held = table.try_acquire(resource, TrainId::new(LineId(1), 0));
    let loser = TrainId::new(LineId(2), 3);
    c.bench_function("lock_contended_acquire", |b| {
        b.iter(|| black_box(table.try_acquire(black_box(resource), loser)));
    });
}

fn bench_held_count(c: &mut Criterion) {
    let table = ResourceLockTable::new(256, 512);
    let mut handles = Vec::new();
    for i in 0..128u32 {
        let resource = ResourceId::Link(LinkId(i * 2));
        handles.extend(table.try_acquire(resource, TrainId::new(LineId(0), i)));
    }
    c.bench_function("lock_held_count_1024", |b| {
        b.iter(|| black_box(table.held_count()));
    });
    for handle in handles {
        table.release(handle);
    }
}

criterion_group!(benches, bench_acquire_release, bench_contended_acquire, bench_held_count);
criterion_main!(benches);
