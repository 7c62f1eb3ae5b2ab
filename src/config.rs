/// Partitioning variant used when a split is committed to the global state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitVariant {
    /// Only the split cluster's members are repartitioned between the pair.
    IntraCluster,
    /// After the split, a full Lloyd loop runs over the entire dataset.
    Global,
    /// After the split, only points strictly closer to the pair are pulled over.
    LocalRepartition,
}

/// Clustering algorithm selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// Plain Lloyd's k-means from a seeded centroid set.
    Lloyd,
    /// Best of `repeats` independently seeded Lloyd runs.
    Repeated,
    /// Grow by splitting uniformly random clusters, then one final Lloyd loop.
    RandomSplit,
    /// Grow by splitting the cluster with the largest tentative SSE drop.
    GreedySplit(SplitVariant),
    /// Grow by repeatedly trial-splitting the worst cluster, keeping the best trial.
    Bisecting,
    /// Perturb one centroid to a random point, accept on improvement.
    RandomSwap,
}

/// Initial centroid seeding method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitMethod {
    /// k distinct points chosen uniformly without replacement.
    Random,
    /// k-means++ weighted seeding.
    KMeansPlusPlus,
}

/// Engine log level. `Quiet` emits nothing, `Debug` emits run summaries,
/// `Verbose` additionally emits per-step events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Quiet,
    Debug,
    Verbose,
}

/// Configuration for a clustering run
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Target number of clusters
    pub k: usize,

    /// Algorithm to run
    pub algorithm: Algorithm,

    /// Seeding method for algorithms that start from k centroids
    pub init: InitMethod,

    /// Iteration cap for every Lloyd loop. `None` means unbounded; the loop
    /// still stops at the first non-improving iteration.
    pub max_iterations: Option<usize>,

    /// Number of independent runs for `Algorithm::Repeated`
    pub repeats: usize,

    /// Number of swap trials for `Algorithm::RandomSwap`
    pub swaps: usize,

    /// Number of trial splits per step for `Algorithm::Bisecting`
    pub bisecting_trials: usize,

    /// Random seed; identical configs reproduce identical results
    pub seed: u64,

    /// Collect per-step `StepSample`s into the result
    pub track_progress: bool,

    /// Engine log level
    pub verbosity: Verbosity,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            k: 8,
            algorithm: Algorithm::Lloyd,
            init: InitMethod::Random,
            max_iterations: Some(100),
            repeats: 10,
            swaps: 100,
            bisecting_trials: 10,
            seed: 0,
            track_progress: false,
            verbosity: Verbosity::Quiet,
        }
    }
}

impl EngineConfig {
    /// Create a new configuration with the specified number of clusters
    pub fn new(k: usize) -> Self {
        Self {
            k,
            ..Default::default()
        }
    }

    /// Set the algorithm
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set the seeding method
    pub fn with_init(mut self, init: InitMethod) -> Self {
        self.init = init;
        self
    }

    /// Set the Lloyd-loop iteration cap (`None` = unbounded)
    pub fn with_max_iterations(mut self, max_iterations: Option<usize>) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the repeat count for repeated k-means
    pub fn with_repeats(mut self, repeats: usize) -> Self {
        self.repeats = repeats;
        self
    }

    /// Set the swap-trial count for random swap
    pub fn with_swaps(mut self, swaps: usize) -> Self {
        self.swaps = swaps;
        self
    }

    /// Set the per-step trial count for bisecting
    pub fn with_bisecting_trials(mut self, bisecting_trials: usize) -> Self {
        self.bisecting_trials = bisecting_trials;
        self
    }

    /// Set the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Enable or disable per-step sample collection
    pub fn with_track_progress(mut self, track_progress: bool) -> Self {
        self.track_progress = track_progress;
        self
    }

    /// Set the log level
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }
}
