use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dive_planner_deco::{
    ceiling::max_ceiling,
    deco::calculate_deco_stops,
    ndl::ndl,
    plan,
    pressure::{GasLoading, PressureConvention},
    simulate::{descend, simulate},
    tissue::{loading, TissueState},
    DiveParameters, ModelConfig,
};

fn air() -> GasLoading {
    GasLoading::new(0.79, PressureConvention::Absolute)
}

fn benchmark_tissue_calculations(c: &mut Criterion) {
    let mut group = c.benchmark_group("tissue_calculations");

    group.bench_function("loading_saturation", |b| {
        b.iter(|| loading(black_box(0.79), black_box(3.16), 0.1, 5.0))
    });

    group.bench_function("loading_desaturation", |b| {
        b.iter(|| loading(black_box(3.0), black_box(1.027), 1.0, 635.0))
    });

    group.bench_function("expose_all_compartments", |b| {
        let tissues = TissueState::equilibrium(0.79);
        b.iter(|| black_box(tissues).expose(3.16, 0.1, |p| p))
    });

    group.finish();
}

fn benchmark_profile(c: &mut Criterion) {
    let mut group = c.benchmark_group("profile");
    let config = ModelConfig::default();
    let gas = air();

    group.bench_function("descent_40m", |b| {
        b.iter(|| descend(TissueState::equilibrium(0.79), &gas, &config, black_box(40.0)))
    });

    group.bench_function("max_ceiling", |b| {
        let tissues = simulate(&gas, &config, 40.0, 30);
        b.iter(|| max_ceiling(black_box(&tissues)))
    });

    group.finish();
}

fn benchmark_deco(c: &mut Criterion) {
    let mut group = c.benchmark_group("deco");
    let config = ModelConfig::default();
    let gas = air();

    for (depth, bottom_time) in [(30.0, 20), (40.0, 30), (50.0, 40)] {
        let tissues = simulate(&gas, &config, depth, bottom_time);
        group.bench_function(format!("stops_{}m_{}min", depth, bottom_time), |b| {
            b.iter(|| calculate_deco_stops(black_box(tissues), &gas, &config, depth))
        });
    }

    group.bench_function("ndl_18m", |b| {
        b.iter(|| ndl(&gas, &config, black_box(18.0), 0))
    });

    group.finish();
}

fn benchmark_planner(c: &mut Criterion) {
    let mut group = c.benchmark_group("planner");

    // worst case: no obligation, so the full no-deco search runs
    group.bench_function("plan_no_deco_12m", |b| {
        b.iter(|| plan(black_box(&DiveParameters::new(12.0, 10, 0.21))))
    });

    group.bench_function("plan_deco_40m", |b| {
        b.iter(|| plan(black_box(&DiveParameters::new(40.0, 30, 0.21))))
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_tissue_calculations,
    benchmark_profile,
    benchmark_deco,
    benchmark_planner
);
criterion_main!(benches);
