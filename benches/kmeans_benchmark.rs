use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ndarray::Array2;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use splitkmeans_rs::{Algorithm, ClusterEngine, EngineConfig, PointSet, SplitVariant};
use std::time::Duration;

fn run_algorithm(data: &Array2<f64>, k: usize, algorithm: Algorithm) {
    let mut points = PointSet::new(data.clone()).unwrap();
    let config = EngineConfig::new(k)
        .with_algorithm(algorithm)
        .with_max_iterations(Some(10))
        .with_repeats(3)
        .with_swaps(20)
        .with_bisecting_trials(3)
        .with_seed(42);
    let mut engine = ClusterEngine::new(config);
    engine.run(black_box(&mut points), None).unwrap();
}

fn benchmark_algorithms(c: &mut Criterion) {
    let mut group = c.benchmark_group("algorithms");
    group.sample_size(10);
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_secs(2));

    let n_samples = 2_000;
    let n_features = 16;
    let k = 10;
    let data = Array2::random((n_samples, n_features), Uniform::new(-10.0, 10.0));

    let algorithms: [(&str, Algorithm); 6] = [
        ("lloyd", Algorithm::Lloyd),
        ("random_split", Algorithm::RandomSplit),
        (
            "greedy_intra",
            Algorithm::GreedySplit(SplitVariant::IntraCluster),
        ),
        (
            "greedy_local",
            Algorithm::GreedySplit(SplitVariant::LocalRepartition),
        ),
        ("bisecting", Algorithm::Bisecting),
        ("random_swap", Algorithm::RandomSwap),
    ];

    for (name, algorithm) in algorithms {
        group.throughput(Throughput::Elements(n_samples as u64));
        group.bench_function(name, |b| {
            b.iter(|| run_algorithm(&data, k, algorithm));
        });
    }
    group.finish();
}

fn benchmark_varying_clusters(c: &mut Criterion) {
    let mut group = c.benchmark_group("greedy_split_clusters");
    group.sample_size(10);
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_secs(2));

    let n_samples = 2_000;
    let n_features = 16;
    let data = Array2::random((n_samples, n_features), Uniform::new(-10.0, 10.0));

    for k in [5, 20, 50] {
        group.throughput(Throughput::Elements(k as u64));
        group.bench_with_input(BenchmarkId::from_parameter(k), &k, |b, &k| {
            b.iter(|| {
                run_algorithm(
                    &data,
                    k,
                    Algorithm::GreedySplit(SplitVariant::LocalRepartition),
                )
            });
        });
    }
    group.finish();
}

fn benchmark_varying_dimensions(c: &mut Criterion) {
    let mut group = c.benchmark_group("lloyd_dimensions");
    group.sample_size(10);
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_secs(2));

    let n_samples = 2_000;
    let k = 10;

    for n_features in [4, 32, 128] {
        group.throughput(Throughput::Elements(n_features as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(n_features),
            &n_features,
            |b, &n_features| {
                let data = Array2::random((n_samples, n_features), Uniform::new(-10.0, 10.0));
                b.iter(|| run_algorithm(&data, k, Algorithm::Lloyd));
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_algorithms,
    benchmark_varying_clusters,
    benchmark_varying_dimensions,
);

criterion_main!(benches);
