use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

use orbitdrift::prelude::*;

fn three_body() -> Scenario {
    Preset::SunEarthJupiter
        .scenario(&PhysicalConstants::default(), SunTreatment::Fixed)
        .expect("preset is valid")
}

/// One integration step per strategy, without recording
fn benchmark_single_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_step");
    let registry = IntegratorRegistry::default();
    let scenario = three_body();
    let field = scenario.force_model();

    for name in registry.list_available() {
        let integrator = registry.create(&name).expect("registered");
        let mut bodies = scenario.bodies().to_vec();

        group.bench_function(BenchmarkId::from_parameter(&name), |b| {
            b.iter(|| {
                integrator
                    .step(black_box(&mut bodies), &field, black_box(0.001))
                    .expect("bodies stay apart");
            });
        });
    }

    group.finish();
}

/// Complete recorded runs at the standard step sizes
fn benchmark_runs(c: &mut Criterion) {
    let mut group = c.benchmark_group("runs");
    group.sample_size(10);
    let registry = IntegratorRegistry::default();
    let scenario = three_body();

    for step_size in [0.1, 0.01, 0.001] {
        let steps = StepConfiguration::new(step_size, 10.0).expect("valid steps");
        group.throughput(Throughput::Elements(steps.step_count() as u64));

        for name in ["explicit_euler", "runge_kutta_second_order"] {
            let integrator = registry.create(name).expect("registered");
            group.bench_with_input(BenchmarkId::new(name, step_size), &steps, |b, &steps| {
                b.iter(|| black_box(Simulation::new(&scenario, integrator.as_ref(), steps).run()));
            });
        }
    }

    group.finish();
}

/// Serial against parallel harness execution
fn benchmark_harness(c: &mut Criterion) {
    let mut group = c.benchmark_group("harness");
    group.sample_size(10);
    let registry = IntegratorRegistry::default();
    let scenario = three_body();

    for parallel in [false, true] {
        let harness = Harness::from_config(
            &RunConfig {
                parallel,
                ..RunConfig::default()
            },
            &registry,
        )
        .expect("default run settings are valid");

        let label = if parallel { "parallel" } else { "serial" };
        group.bench_function(label, |b| b.iter(|| black_box(harness.run(&scenario))));
    }

    group.finish();
}

criterion_group!(benches, benchmark_single_step, benchmark_runs, benchmark_harness);
criterion_main!(benches);
