//! Bisecting k-means: repeatedly trial-split the cluster with the largest
//! raw SSE, keeping the best of several disposable trials before committing.

use crate::algorithm::{assign, lloyd};
use crate::data::{CentroidSet, PointSet};
use crate::distance::cluster_sse;
use crate::error::ClusterError;
use crate::init::random_seed;
use crate::split::{argmax, splittable_argmax};
use crate::stats::StepRecorder;
use rand_chacha::ChaCha8Rng;

/// One disposable two-centroid trial on a copy of the cluster's members.
fn trial_split(
    local: &PointSet,
    max_iterations: Option<usize>,
    rng: &mut ChaCha8Rng,
) -> Result<(f64, CentroidSet, Vec<usize>), ClusterError> {
    let mut candidate = local.clone();
    let mut pair = random_seed(2, &candidate, rng)?;
    let sse = lloyd(&mut candidate, &mut pair, max_iterations)?;
    Ok((sse, pair, candidate.labels().to_vec()))
}

/// Grow `centroids` to `k` clusters. Each step picks the splittable cluster
/// (2 or more members) with the largest SSE, skipping singleton and empty
/// clusters, runs `trials` independent trial splits (independent random
/// seed pairs, global state untouched), commits the lowest-SSE trial
/// (overwrite target, append second half), re-runs global assignment, and
/// recomputes the SSE list for the split pair only. Ends with one final full
/// Lloyd loop. Returns the final SSE.
pub fn bisecting(
    points: &mut PointSet,
    centroids: &mut CentroidSet,
    k: usize,
    trials: usize,
    max_iterations: Option<usize>,
    rng: &mut ChaCha8Rng,
    recorder: &mut StepRecorder<'_>,
) -> Result<f64, ClusterError> {
    assign(points, centroids)?;

    let mut sse_list: Vec<f64> = (0..centroids.len())
        .map(|c| cluster_sse(points, centroids, c))
        .collect();

    let mut step = 0;
    while centroids.len() < k {
        let target = match splittable_argmax(points, &sse_list) {
            Some(target) => target,
            None => {
                let cluster = argmax(&sse_list);
                return Err(ClusterError::UnsplittableCluster {
                    cluster,
                    size: points.members_of(cluster).len(),
                });
            }
        };

        let members = points.members_of(target);
        let local = points.subset(&members);

        let mut best = trial_split(&local, max_iterations, rng)?;
        for _ in 1..trials.max(1) {
            let candidate = trial_split(&local, max_iterations, rng)?;
            if candidate.0 < best.0 {
                best = candidate;
            }
        }
        let (_, pair, local_labels) = best;

        centroids.set_centroid(target, pair.centroid(0));
        let appended = centroids.push(pair.centroid(1))?;
        for (li, &gi) in members.iter().enumerate() {
            let label = if local_labels[li] == 0 { target } else { appended };
            points.set_label(gi, label);
        }

        assign(points, centroids)?;

        sse_list.push(0.0);
        sse_list[target] = cluster_sse(points, centroids, target);
        sse_list[appended] = cluster_sse(points, centroids, appended);

        step += 1;
        let total: f64 = sse_list.iter().sum();
        recorder.record(step, centroids, total, Some(target));
    }

    let sse = lloyd(points, centroids, max_iterations)?;
    recorder.record(step + 1, centroids, sse, None);
    Ok(sse)
}
