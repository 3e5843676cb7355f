//! Criterion benchmarks for the generation engine.
//!
//! Measures full runs over a few population sizes, plus the fitness and
//! selection kernels on their own.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_traitsim::random::create_rng;
use u_traitsim::sim::{
    FitnessStrategy, GenerationEngine, InitMode, PopulationState, ReproductionMode, RouletteSelector,
    SimConfig, TraitMatrix,
};

fn targets(n_traits: usize) -> Vec<f64> {
    (0..n_traits).map(|t| 10.0 + 5.0 * t as f64).collect()
}

fn bench_clonal_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("clonal_run");
    group.sample_size(10);

    for (n, t, gen) in [(100usize, 4usize, 100usize), (500, 8, 50), (1000, 16, 20)] {
        let config = SimConfig::default()
            .with_fitness(FitnessStrategy::gaussian(1.0))
            .with_reproduction(ReproductionMode::Clonal)
            .with_record_history(true)
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::new(format!("n{}_t{}_g{}", n, t, gen), n),
            &config,
            |b, config| {
                b.iter(|| {
                    let mut engine = GenerationEngine::new(n, t, config.clone()).unwrap();
                    engine.initialize(InitMode::Constant(15.0)).unwrap();
                    engine.set_targets(&targets(t)).unwrap();
                    black_box(engine.run(black_box(gen)).unwrap())
                })
            },
        );
    }
    group.finish();
}

fn bench_fitness(c: &mut Criterion) {
    let mut group = c.benchmark_group("fitness");

    let mut rng = create_rng(42);
    let mut state = PopulationState::new(1000, 8);
    state.initialize(InitMode::Random, &mut rng).unwrap();
    let matrix: TraitMatrix = state.matrix().clone();
    let t = targets(8);

    for strategy in [
        FitnessStrategy::gaussian(1.0),
        FitnessStrategy::linear(0.1),
        FitnessStrategy::Uniform,
    ] {
        group.bench_function(strategy.name(), |b| {
            b.iter(|| black_box(strategy.evaluate_total(black_box(&matrix), &t)))
        });
    }
    group.finish();
}

fn bench_roulette(c: &mut Criterion) {
    let mut group = c.benchmark_group("roulette");

    for &n in &[100usize, 1000, 10_000] {
        let fitness: Vec<f64> = (0..n).map(|i| 1.0 + (i % 17) as f64).collect();
        let selector = RouletteSelector::default();
        group.bench_with_input(BenchmarkId::from_parameter(n), &fitness, |b, f| {
            let mut rng = create_rng(7);
            b.iter(|| black_box(selector.choose_parents(black_box(f), &mut rng).unwrap()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_clonal_run, bench_fitness, bench_roulette);
criterion_main!(benches);
