//! Tick loop throughput
//!
//! Full-horizon runs of every built-in workload, plus the container demos.
//!
//! Run with: cargo bench --bench tick_loop

use cadence_core::scheduling::{
    ContainerDemo, ContainerKind, DisciplineKind, NullObserver, Preset, Workload,
};
use cadence_core::SimParams;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn bench_scheduler_horizon(c: &mut Criterion) {
    let params = SimParams::default();
    let mut group = c.benchmark_group("scheduler_horizon");

    for kind in DisciplineKind::all() {
        for workload in [Workload::Structured, Workload::Starved] {
            let preset = Preset::new(kind, workload);
            group.bench_with_input(
                BenchmarkId::new(kind.to_string(), workload),
                &preset,
                |b, preset| {
                    b.iter(|| {
                        let mut scheduler = preset.build(&params).unwrap();
                        black_box(scheduler.run_for(params.horizon, &mut NullObserver))
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_container_demo(c: &mut Criterion) {
    let mut group = c.benchmark_group("container_demo");

    for kind in [ContainerKind::Stack, ContainerKind::Queue] {
        group.bench_with_input(BenchmarkId::from_parameter(kind), &kind, |b, &kind| {
            b.iter(|| {
                let mut demo = ContainerDemo::new(kind, Some(1));
                black_box(demo.run_for(10_000, &mut NullObserver))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_scheduler_horizon, bench_container_demo);
criterion_main!(benches);
