// benches/bench_gate.rs
use criterion::{
    black_box, criterion_group, criterion_main, AxisScale, BenchmarkId, Criterion,
    PlotConfiguration,
};
use intersection_sim::control_system::gate::Gate;
use std::sync::Arc;
use std::time::Duration;

fn bench_uncontended(c: &mut Criterion) {
    let gate = Gate::new("bench", 2);
    c.bench_function("gate_try_acquire_release", |b| {
        b.iter(|| {
            assert!(gate.try_acquire());
            gate.release();
            black_box(gate.available());
        });
    });
}

fn bench_contended_handoff(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(4)
        .enable_all()
        .build()
        .unwrap();

    let mut group = c.benchmark_group("gate_contended");
    group.measurement_time(Duration::from_secs(5));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    // Each agent takes a permit and hands it straight back, like a vehicle
    // crossing in zero time.
    for &agents in [2usize, 8, 32].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(agents), &agents, |b, &agents| {
            b.iter(|| {
                runtime.block_on(async {
                    let gate = Arc::new(Gate::new("intersection", 2));
                    let tasks: Vec<_> = (0..agents)
                        .map(|_| {
                            let gate = Arc::clone(&gate);
                            tokio::spawn(async move {
                                for _ in 0..10 {
                                    gate.acquire().await;
                                    gate.release();
                                }
                            })
                        })
                        .collect();
                    for task in tasks {
                        task.await.unwrap();
                    }
                    black_box(gate.available());
                });
            });
        });
    }
    group.finish();
}

fn bench_rearm(c: &mut Criterion) {
    let gate = Gate::new("north/straight", 0);
    c.bench_function("gate_set_available_then_drain", |b| {
        b.iter(|| {
            gate.set_available(black_box(3));
            black_box(gate.drain());
        });
    });
}

criterion_group!(benches, bench_uncontended, bench_contended_handoff, bench_rearm);
criterion_main!(benches);
