//! Runs every clustering algorithm on the same synthetic dataset and prints
//! SSE, Centroid Index, and elapsed time for each.
//!
//! Usage: `compare-algorithms [n_points] [n_clusters] [dims] [seed]`

use ndarray::Array2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use splitkmeans_rs::{
    centroid_index, Algorithm, CentroidSet, ClusterEngine, EngineConfig, PointSet, SplitVariant,
};
use std::env;
use std::time::Instant;

/// Gaussian-ish blobs around uniformly placed centers.
fn generate_blobs(
    n_points: usize,
    n_clusters: usize,
    dims: usize,
    seed: u64,
) -> (Array2<f64>, CentroidSet) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut centers = Array2::zeros((n_clusters, dims));
    for c in 0..n_clusters {
        for j in 0..dims {
            centers[[c, j]] = rng.gen_range(-100.0..100.0);
        }
    }

    let mut data = Array2::zeros((n_points, dims));
    for i in 0..n_points {
        let c = i % n_clusters;
        for j in 0..dims {
            data[[i, j]] = centers[[c, j]] + rng.gen_range(-1.0..1.0);
        }
    }

    let truth = CentroidSet::from_rows(centers).expect("n_clusters > 0");
    (data, truth)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let n_points: usize = args.get(1).map_or(Ok(2000), |a| a.parse())?;
    let n_clusters: usize = args.get(2).map_or(Ok(10), |a| a.parse())?;
    let dims: usize = args.get(3).map_or(Ok(2), |a| a.parse())?;
    let seed: u64 = args.get(4).map_or(Ok(42), |a| a.parse())?;

    let (data, truth) = generate_blobs(n_points, n_clusters, dims, seed);
    eprintln!(
        "Dataset: {} points, {} dimensions, {} true clusters, seed {}",
        n_points, dims, n_clusters, seed
    );

    let algorithms: [(&str, Algorithm); 8] = [
        ("k-means", Algorithm::Lloyd),
        ("repeated k-means", Algorithm::Repeated),
        ("random split", Algorithm::RandomSplit),
        (
            "greedy split (intra)",
            Algorithm::GreedySplit(SplitVariant::IntraCluster),
        ),
        (
            "greedy split (global)",
            Algorithm::GreedySplit(SplitVariant::Global),
        ),
        (
            "greedy split (local rep.)",
            Algorithm::GreedySplit(SplitVariant::LocalRepartition),
        ),
        ("bisecting", Algorithm::Bisecting),
        ("random swap", Algorithm::RandomSwap),
    ];

    println!(
        "{:<28} {:>14} {:>5} {:>10}",
        "algorithm", "SSE", "CI", "time (ms)"
    );
    for (name, algorithm) in algorithms {
        let mut points = PointSet::new(data.clone())?;
        let config = EngineConfig::new(n_clusters)
            .with_algorithm(algorithm)
            .with_seed(seed);
        let mut engine = ClusterEngine::new(config);

        let start = Instant::now();
        let result = engine.run(&mut points, Some(&truth))?;
        let elapsed = start.elapsed();

        let ci = centroid_index(&result.centroids, &truth);
        println!(
            "{:<28} {:>14.2} {:>5} {:>10.1}",
            name,
            result.sse,
            ci,
            elapsed.as_secs_f64() * 1000.0
        );
    }

    Ok(())
}
