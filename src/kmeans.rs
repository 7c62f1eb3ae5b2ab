use crate::algorithm::{assign, lloyd};
use crate::bisecting::bisecting;
use crate::config::{Algorithm, EngineConfig, InitMethod, Verbosity};
use crate::data::{CentroidSet, ClusteringResult, PointSet};
use crate::error::ClusterError;
use crate::greedy::greedy_split;
use crate::init::{kmeans_pp_seed, random_seed};
use crate::quality::centroid_index;
use crate::split::random_split;
use crate::stats::StepRecorder;
use crate::swap::random_swap;
use ndarray::Axis;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// Clustering engine: runs the configured algorithm over one in-memory point
/// set and produces the final centroids, assignment, and SSE.
///
/// # Example
///
/// ```
/// use splitkmeans_rs::{Algorithm, ClusterEngine, EngineConfig, PointSet};
/// use ndarray::array;
///
/// let data = array![[0.0, 0.0], [0.0, 1.0], [10.0, 10.0], [10.0, 11.0]];
/// let mut points = PointSet::new(data).unwrap();
///
/// let config = EngineConfig::new(2)
///     .with_algorithm(Algorithm::Bisecting)
///     .with_seed(7);
/// let mut engine = ClusterEngine::new(config);
///
/// let result = engine.run(&mut points, None).unwrap();
/// assert_eq!(result.centroids.len(), 2);
/// assert_eq!(result.labels.len(), 4);
/// ```
pub struct ClusterEngine {
    config: EngineConfig,
}

impl ClusterEngine {
    /// Create an engine with the given configuration.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run the configured algorithm.
    ///
    /// `ground_truth` is used only for Centroid Index reporting, never by
    /// the clustering itself. The same configuration (including seed)
    /// reproduces the same result.
    ///
    /// # Errors
    ///
    /// Returns an error when k is 0, the point set is smaller than k, the
    /// ground truth dimensionality does not match the data, or a split step
    /// runs out of splittable clusters. A failed run leaves no algorithm
    /// state behind; the caller can record the failure and continue with the
    /// next trial.
    pub fn run(
        &mut self,
        points: &mut PointSet,
        ground_truth: Option<&CentroidSet>,
    ) -> Result<ClusteringResult, ClusterError> {
        self.validate(points, ground_truth)?;

        let config = &self.config;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let mut recorder = StepRecorder::new(
            config.track_progress,
            config.verbosity >= Verbosity::Verbose,
            ground_truth,
        );

        if config.verbosity >= Verbosity::Debug {
            debug!(
                algorithm = ?config.algorithm,
                k = config.k,
                n_points = points.len(),
                dims = points.dims(),
                seed = config.seed,
                "starting clustering run"
            );
        }

        let k = config.k;
        let cap = config.max_iterations;

        let (sse, centroids) = match config.algorithm {
            Algorithm::Lloyd => {
                let mut centroids = seed(config.init, k, points, &mut rng)?;
                let sse = lloyd(points, &mut centroids, cap)?;
                recorder.record(1, &centroids, sse, None);
                (sse, centroids)
            }
            Algorithm::Repeated => run_repeated(config, points, &mut rng, &mut recorder)?,
            Algorithm::RandomSplit => {
                let mut centroids = single_mean_centroid(points)?;
                assign(points, &centroids)?;
                let sse = random_split(points, &mut centroids, k, cap, &mut rng, &mut recorder)?;
                (sse, centroids)
            }
            Algorithm::GreedySplit(variant) => {
                let mut centroids = single_mean_centroid(points)?;
                let sse = greedy_split(
                    points,
                    &mut centroids,
                    k,
                    variant,
                    cap,
                    &mut rng,
                    &mut recorder,
                )?;
                (sse, centroids)
            }
            Algorithm::Bisecting => {
                let mut centroids = single_mean_centroid(points)?;
                let sse = bisecting(
                    points,
                    &mut centroids,
                    k,
                    config.bisecting_trials,
                    cap,
                    &mut rng,
                    &mut recorder,
                )?;
                (sse, centroids)
            }
            Algorithm::RandomSwap => {
                let mut centroids = seed(config.init, k, points, &mut rng)?;
                let sse = random_swap(
                    points,
                    &mut centroids,
                    config.swaps,
                    cap,
                    &mut rng,
                    &mut recorder,
                )?;
                (sse, centroids)
            }
        };

        if config.verbosity >= Verbosity::Debug {
            let ci = ground_truth.map(|gt| centroid_index(&centroids, gt));
            debug!(
                sse,
                ci,
                centroid_count = centroids.len(),
                elapsed_ms = recorder.elapsed().as_millis() as u64,
                "clustering run finished"
            );
        }

        Ok(ClusteringResult {
            centroids,
            labels: points.labels().to_vec(),
            sse,
            samples: recorder.into_samples(),
        })
    }

    fn validate(
        &self,
        points: &PointSet,
        ground_truth: Option<&CentroidSet>,
    ) -> Result<(), ClusterError> {
        if self.config.k == 0 {
            return Err(ClusterError::InvalidK("k must be greater than 0".to_string()));
        }
        if points.is_empty() {
            return Err(ClusterError::EmptyPointSet);
        }
        if points.len() < self.config.k {
            return Err(ClusterError::InsufficientData(format!(
                "number of points ({}) is less than k ({})",
                points.len(),
                self.config.k
            )));
        }
        if let Some(gt) = ground_truth {
            if gt.dims() != points.dims() {
                return Err(ClusterError::DimensionMismatch(format!(
                    "ground truth has {} dimensions, points have {}",
                    gt.dims(),
                    points.dims()
                )));
            }
        }
        Ok(())
    }
}

fn seed(
    init: InitMethod,
    k: usize,
    points: &PointSet,
    rng: &mut ChaCha8Rng,
) -> Result<CentroidSet, ClusterError> {
    match init {
        InitMethod::Random => random_seed(k, points, rng),
        InitMethod::KMeansPlusPlus => kmeans_pp_seed(k, points, rng),
    }
}

/// Starting state for the split-growth algorithms: one centroid at the
/// dataset mean, all points in cluster 0.
fn single_mean_centroid(points: &PointSet) -> Result<CentroidSet, ClusterError> {
    CentroidSet::from_rows(points.mean().insert_axis(Axis(0)))
}

/// Best of `repeats` independently seeded Lloyd runs.
fn run_repeated(
    config: &EngineConfig,
    points: &mut PointSet,
    rng: &mut ChaCha8Rng,
    recorder: &mut StepRecorder<'_>,
) -> Result<(f64, CentroidSet), ClusterError> {
    let repeats = config.repeats.max(1);

    let mut centroids = seed(config.init, config.k, points, rng)?;
    let mut best_sse = lloyd(points, &mut centroids, config.max_iterations)?;
    let mut best_labels = points.labels().to_vec();
    recorder.record(1, &centroids, best_sse, None);

    for repeat in 1..repeats {
        let mut candidate = seed(config.init, config.k, points, rng)?;
        let sse = lloyd(points, &mut candidate, config.max_iterations)?;
        recorder.record(repeat + 1, &candidate, sse, None);
        if sse < best_sse {
            best_sse = sse;
            best_labels = points.labels().to_vec();
            centroids = candidate;
        }
    }

    // the last repeat ran on the shared label buffer; put the winner back
    for (i, &label) in best_labels.iter().enumerate() {
        points.set_label(i, label);
    }

    Ok((best_sse, centroids))
}
