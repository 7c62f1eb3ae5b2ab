//! Random-swap optimizer: a hill-climbing perturb-and-test loop. Each trial
//! teleports one centroid onto a random point, locally repairs the partition,
//! polishes with two Lloyd iterations, and keeps the change only when it
//! strictly improves the best SSE seen; a rejected trial is rolled back to an
//! exact snapshot of both centroid coordinates and point labels.

use crate::algorithm::{assign, lloyd};
use crate::data::{CentroidSet, PointSet, Snapshot};
use crate::distance::{nearest_centroid, squared_distance, sum_squared_error};
use crate::error::ClusterError;
use crate::stats::StepRecorder;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// Lloyd iterations after each swap; the accept test needs only a coarse
/// polish, full convergence would dominate the runtime.
const REPAIR_ITERATIONS: usize = 2;

/// Two-pass local repair after centroid `swapped` moved: points the centroid
/// used to own are rehomed to their nearest centroid, and points of other
/// clusters are pulled over only when the moved centroid is strictly closer.
fn repair_assignments(points: &mut PointSet, centroids: &CentroidSet, swapped: usize) {
    for i in 0..points.len() {
        if points.label(i) == swapped {
            let (best, _) = nearest_centroid(points.point(i), centroids);
            points.set_label(i, best);
        }
    }
    for i in 0..points.len() {
        let current = points.label(i);
        if current == swapped {
            continue;
        }
        let point = points.point(i);
        let d_swapped = squared_distance(point, centroids.centroid(swapped));
        let d_current = squared_distance(point, centroids.centroid(current));
        if d_swapped < d_current {
            points.set_label(i, swapped);
        }
    }
}

/// Run `swaps` perturbation trials on an already-assigned partition and
/// return the best SSE reached.
pub fn random_swap(
    points: &mut PointSet,
    centroids: &mut CentroidSet,
    swaps: usize,
    max_iterations: Option<usize>,
    rng: &mut ChaCha8Rng,
    recorder: &mut StepRecorder<'_>,
) -> Result<f64, ClusterError> {
    assign(points, centroids)?;
    let mut best = sum_squared_error(points, centroids);

    let short_cap = Some(match max_iterations {
        Some(cap) => cap.min(REPAIR_ITERATIONS),
        None => REPAIR_ITERATIONS,
    });

    for trial in 0..swaps {
        let snapshot = Snapshot::capture(points, centroids);

        let target = rng.gen_range(0..centroids.len());
        let donor = rng.gen_range(0..points.len());
        centroids.set_centroid(target, points.point(donor));
        repair_assignments(points, centroids, target);

        let sse = lloyd(points, centroids, short_cap)?;
        if sse < best {
            best = sse;
            recorder.record(trial + 1, centroids, sse, Some(target));
        } else {
            snapshot.restore(points, centroids);
        }
    }

    Ok(best)
}
