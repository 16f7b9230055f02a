//! Criterion benchmarks for u-metabench algorithms.
//!
//! Runs every algorithm family to budget exhaustion on the built-in
//! instances to measure per-evaluation overhead.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_metabench::algorithm::SearchAlgorithm;
use u_metabench::es::{EsConfig, EvolutionStrategy};
use u_metabench::ga::{GaConfig, GeneticAlgorithm, Selection};
use u_metabench::local_search::{LocalSearch, LocalSearchConfig};
use u_metabench::problem::{
    BinaryFunction, BinaryFunctionKind, ContinuousFunction, ContinuousFunctionKind, InstanceSize,
    Knapsack, Tsp,
};

fn drive<A: SearchAlgorithm>(algorithm: &mut A) -> f64 {
    while !algorithm.step().expect("step failed") {}
    algorithm.best_value()
}

fn bench_local_search_knapsack(c: &mut Criterion) {
    let mut group = c.benchmark_group("local_search_knapsack");
    group.sample_size(10);

    let variants = [
        ("random_ls", LocalSearchConfig::random_walk()),
        ("simulated_annealing", LocalSearchConfig::simulated_annealing()),
        ("tabu", LocalSearchConfig::tabu()),
    ];
    for (name, config) in variants {
        group.bench_with_input(BenchmarkId::from_parameter(name), &config, |b, config| {
            b.iter(|| {
                let mut problem = Knapsack::instance(InstanceSize::Large, 5000);
                let mut search =
                    LocalSearch::new(&mut problem, config.clone().with_seed(42)).expect("valid");
                black_box(drive(&mut search))
            })
        });
    }
    group.finish();
}

fn bench_es_sphere(c: &mut Criterion) {
    let mut group = c.benchmark_group("es_sphere");
    group.sample_size(10);

    for size in [InstanceSize::Small, InstanceSize::Medium, InstanceSize::Large] {
        let dim = size.function_dimension();
        group.bench_with_input(BenchmarkId::from_parameter(dim), &size, |b, &size| {
            b.iter(|| {
                let mut problem =
                    ContinuousFunction::instance(ContinuousFunctionKind::Sphere, size, 10_000);
                let mut es =
                    EvolutionStrategy::new(&mut problem, EsConfig::random_es().with_seed(42))
                        .expect("valid");
                black_box(drive(&mut es))
            })
        });
    }
    group.finish();
}

fn bench_ga_onemax(c: &mut Criterion) {
    let mut group = c.benchmark_group("ga_onemax");
    group.sample_size(10);

    for (mu, lambda) in [(5usize, 10usize), (20, 40), (50, 100)] {
        let config = GaConfig::default()
            .with_mu(mu)
            .with_lambda(lambda)
            .with_selection(Selection::Tournament { k: 3 })
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::new(format!("mu{mu}_lambda{lambda}"), mu),
            &config,
            |b, config| {
                b.iter(|| {
                    let mut problem = BinaryFunction::instance(
                        BinaryFunctionKind::OneMax,
                        InstanceSize::Large,
                        10_000,
                    );
                    let mut ga =
                        GeneticAlgorithm::new(&mut problem, config.clone()).expect("valid");
                    black_box(drive(&mut ga))
                })
            },
        );
    }
    group.finish();
}

fn bench_ga_tsp(c: &mut Criterion) {
    c.bench_function("ga_tsp_large", |b| {
        b.iter(|| {
            let mut problem = Tsp::instance(InstanceSize::Large, 10_000);
            let config = GaConfig::permutation()
                .with_selection(Selection::Tournament { k: 2 })
                .with_seed(42);
            let mut ga = GeneticAlgorithm::new(&mut problem, config).expect("valid");
            black_box(drive(&mut ga))
        })
    });
}

criterion_group!(
    benches,
    bench_local_search_knapsack,
    bench_es_sphere,
    bench_ga_onemax,
    bench_ga_tsp
);
criterion_main!(benches);
