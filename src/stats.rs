use crate::data::CentroidSet;
use crate::quality::centroid_index;
use std::time::{Duration, Instant};
use tracing::debug;

/// One per-step progress sample emitted by a clustering driver.
#[derive(Debug, Clone)]
pub struct StepSample {
    /// Step counter within the run (1-based)
    pub iteration: usize,
    /// Centroid count after this step
    pub centroid_count: usize,
    /// SSE after this step
    pub sse: f64,
    /// Centroid Index against ground truth, when ground truth was supplied
    pub ci: Option<usize>,
    /// Cluster index that was split or swapped in this step, if any
    pub split_target: Option<usize>,
    /// Time elapsed since the run started
    pub elapsed: Duration,
}

/// Collects [`StepSample`]s during a run and computes CI against the optional
/// ground-truth centroid set as it goes.
pub struct StepRecorder<'a> {
    enabled: bool,
    verbose: bool,
    ground_truth: Option<&'a CentroidSet>,
    start: Instant,
    samples: Vec<StepSample>,
}

impl<'a> StepRecorder<'a> {
    pub fn new(enabled: bool, verbose: bool, ground_truth: Option<&'a CentroidSet>) -> Self {
        Self {
            enabled,
            verbose,
            ground_truth,
            start: Instant::now(),
            samples: Vec::new(),
        }
    }

    pub fn record(
        &mut self,
        iteration: usize,
        centroids: &CentroidSet,
        sse: f64,
        split_target: Option<usize>,
    ) {
        if !self.enabled && !self.verbose {
            return;
        }
        let ci = self.ground_truth.map(|gt| centroid_index(centroids, gt));
        if self.verbose {
            debug!(
                iteration,
                centroid_count = centroids.len(),
                sse,
                ci,
                split_target,
                "clustering step"
            );
        }
        if self.enabled {
            self.samples.push(StepSample {
                iteration,
                centroid_count: centroids.len(),
                sse,
                ci,
                split_target,
                elapsed: self.start.elapsed(),
            });
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn into_samples(self) -> Vec<StepSample> {
        self.samples
    }
}

/// Running sums across repeated experiment trials. Created per experiment,
/// fed once per trial, read once at the end.
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    trials: usize,
    successes: usize,
    sse_total: f64,
    ci_total: f64,
    time_total: Duration,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one trial. A trial counts as a success when CI == 0.
    pub fn record(&mut self, sse: f64, ci: Option<usize>, elapsed: Duration) {
        self.trials += 1;
        self.sse_total += sse;
        if let Some(ci) = ci {
            self.ci_total += ci as f64;
            if ci == 0 {
                self.successes += 1;
            }
        }
        self.time_total += elapsed;
    }

    pub fn trials(&self) -> usize {
        self.trials
    }

    pub fn mean_sse(&self) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            self.sse_total / self.trials as f64
        }
    }

    pub fn mean_ci(&self) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            self.ci_total / self.trials as f64
        }
    }

    /// Fraction of trials that reached CI == 0
    pub fn success_rate(&self) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            self.successes as f64 / self.trials as f64
        }
    }

    pub fn total_time(&self) -> Duration {
        self.time_total
    }
}
