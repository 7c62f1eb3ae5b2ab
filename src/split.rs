//! Cluster-splitting heuristics: replace one centroid with two, partitioning
//! its members between them via a local Lloyd loop on the extracted subset.
//!
//! Every committed split grows the centroid set by exactly one. The split
//! target keeps its position (overwritten with the first half) and the second
//! half is appended, so indices at or below the pair stay stable.

use crate::algorithm::lloyd;
use crate::data::{CentroidSet, PointSet, UNASSIGNED};
use crate::distance::squared_distance;
use crate::error::ClusterError;
use crate::init::random_seed;
use crate::stats::StepRecorder;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// Where the two halves of a split landed, plus which other clusters lost
/// points to the pair (local repartition only).
#[derive(Debug, Clone)]
pub struct SplitOutcome {
    /// Index of the split cluster; overwritten in place with the first half
    pub retained: usize,
    /// Index of the appended centroid (always the set's new last index)
    pub appended: usize,
    /// Clusters whose membership changed beyond the split pair itself
    pub affected: Vec<usize>,
}

/// First-seen argmax over a per-cluster score slice; exact ties go to the
/// lower cluster index.
pub(crate) fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    let mut best_value = f64::NEG_INFINITY;
    for (i, &v) in values.iter().enumerate() {
        if v > best_value {
            best_value = v;
            best = i;
        }
    }
    best
}

/// First-seen argmax over per-cluster scores, restricted to clusters holding
/// at least 2 points. Clusters below that threshold cannot split and are
/// skipped, no matter their score. Returns `None` when no cluster qualifies.
pub(crate) fn splittable_argmax(points: &PointSet, scores: &[f64]) -> Option<usize> {
    let mut counts = vec![0usize; scores.len()];
    for &label in points.labels() {
        if label != UNASSIGNED {
            counts[label] += 1;
        }
    }

    let mut best = None;
    let mut best_score = f64::NEG_INFINITY;
    for (c, &score) in scores.iter().enumerate() {
        if counts[c] < 2 {
            continue;
        }
        if score > best_score {
            best_score = score;
            best = Some(c);
        }
    }
    best
}

/// Split `cluster` in two: extract its members, seed two local centroids from
/// two distinct random members, run a local Lloyd loop on the subset, and
/// write the result back (half 0 overwrites `cluster`, half 1 is appended).
/// Only the split cluster's members are relabeled.
pub fn split_in_two(
    points: &mut PointSet,
    centroids: &mut CentroidSet,
    cluster: usize,
    max_iterations: Option<usize>,
    rng: &mut ChaCha8Rng,
) -> Result<SplitOutcome, ClusterError> {
    let members = points.members_of(cluster);
    if members.len() < 2 {
        return Err(ClusterError::UnsplittableCluster {
            cluster,
            size: members.len(),
        });
    }

    let mut local = points.subset(&members);
    let mut pair = random_seed(2, &local, rng)?;
    lloyd(&mut local, &mut pair, max_iterations)?;

    centroids.set_centroid(cluster, pair.centroid(0));
    let appended = centroids.push(pair.centroid(1))?;

    for (li, &gi) in members.iter().enumerate() {
        let label = if local.label(li) == 0 { cluster } else { appended };
        points.set_label(gi, label);
    }

    Ok(SplitOutcome {
        retained: cluster,
        appended,
        affected: Vec::new(),
    })
}

/// Intra-cluster split: the subset result alone decides the final assignment
/// of the split cluster's members; no other point is touched.
pub fn intra_cluster_split(
    points: &mut PointSet,
    centroids: &mut CentroidSet,
    cluster: usize,
    max_iterations: Option<usize>,
    rng: &mut ChaCha8Rng,
) -> Result<SplitOutcome, ClusterError> {
    split_in_two(points, centroids, cluster, max_iterations, rng)
}

/// Global split: after growing the centroid set, re-run a full Lloyd loop
/// over the entire dataset so the new centroid competes for outside points.
pub fn global_split(
    points: &mut PointSet,
    centroids: &mut CentroidSet,
    cluster: usize,
    max_iterations: Option<usize>,
    rng: &mut ChaCha8Rng,
) -> Result<SplitOutcome, ClusterError> {
    let outcome = split_in_two(points, centroids, cluster, max_iterations, rng)?;
    lloyd(points, centroids, max_iterations)?;
    Ok(outcome)
}

/// Local repartition split: after the split, pull over only the points that
/// are now strictly closer to one of the pair than to their current centroid.
/// No full global pass; clusters that lost points are recorded in `affected`
/// for incremental SSE bookkeeping.
pub fn local_repartition_split(
    points: &mut PointSet,
    centroids: &mut CentroidSet,
    cluster: usize,
    max_iterations: Option<usize>,
    rng: &mut ChaCha8Rng,
) -> Result<SplitOutcome, ClusterError> {
    let mut outcome = split_in_two(points, centroids, cluster, max_iterations, rng)?;

    for i in 0..points.len() {
        let current = points.label(i);
        if current == outcome.retained || current == outcome.appended {
            continue;
        }
        let point = points.point(i);
        let d_current = squared_distance(point, centroids.centroid(current));
        let d_old = squared_distance(point, centroids.centroid(outcome.retained));
        let d_new = squared_distance(point, centroids.centroid(outcome.appended));

        let (target, d_pair) = if d_old <= d_new {
            (outcome.retained, d_old)
        } else {
            (outcome.appended, d_new)
        };
        if d_pair < d_current {
            points.set_label(i, target);
            if !outcome.affected.contains(&current) {
                outcome.affected.push(current);
            }
        }
    }

    Ok(outcome)
}

/// Random split: pick a uniformly random splittable cluster and split it
/// intra-cluster, until the centroid count reaches `k`; then one final full
/// Lloyd loop. Returns the final SSE.
pub fn random_split(
    points: &mut PointSet,
    centroids: &mut CentroidSet,
    k: usize,
    max_iterations: Option<usize>,
    rng: &mut ChaCha8Rng,
    recorder: &mut StepRecorder<'_>,
) -> Result<f64, ClusterError> {
    let mut step = 0;
    while centroids.len() < k {
        // some cluster must hold >= 2 points while centroid count < k <= n
        let target = loop {
            let candidate = rng.gen_range(0..centroids.len());
            if points.members_of(candidate).len() >= 2 {
                break candidate;
            }
        };
        split_in_two(points, centroids, target, max_iterations, rng)?;
        step += 1;
        let sse = crate::distance::sum_squared_error(points, centroids);
        recorder.record(step, centroids, sse, Some(target));
    }
    let sse = lloyd(points, centroids, max_iterations)?;
    recorder.record(step + 1, centroids, sse, None);
    Ok(sse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::assign as assign_step;
    use ndarray::array;
    use rand::SeedableRng;

    fn seeded_state() -> (PointSet, CentroidSet) {
        let mut points = PointSet::new(array![
            [0.0, 0.0],
            [0.0, 1.0],
            [10.0, 10.0],
            [10.0, 11.0],
            [50.0, 50.0]
        ])
        .unwrap();
        // one wide cluster holding both pairs, one singleton
        let mut centroids = CentroidSet::from_rows(array![[5.0, 5.0], [50.0, 50.0]]).unwrap();
        assign_step(&mut points, &centroids).unwrap();
        crate::algorithm::update_centroids(&mut centroids, &points);
        (points, centroids)
    }

    #[test]
    fn test_splittable_argmax_skips_small_clusters() {
        let mut points = PointSet::new(array![
            [0.0, 0.0],
            [5.0, 5.0],
            [5.0, 6.0],
            [9.0, 9.0]
        ])
        .unwrap();
        for (i, l) in [0usize, 1, 1, 2].iter().enumerate() {
            points.set_label(i, *l);
        }

        // the singleton clusters carry the highest scores but cannot split
        let scores = [10.0, 1.0, 3.0];
        assert_eq!(splittable_argmax(&points, &scores), Some(1));

        // exact ties resolve to the lower qualifying index
        points.set_label(3, 0);
        assert_eq!(splittable_argmax(&points, &[2.0, 2.0, 0.0]), Some(0));
    }

    #[test]
    fn test_splittable_argmax_none_when_all_singletons() {
        let mut points =
            PointSet::new(array![[0.0, 0.0], [5.0, 5.0], [9.0, 9.0]]).unwrap();
        for i in 0..3 {
            points.set_label(i, i);
        }
        assert_eq!(splittable_argmax(&points, &[1.0, 2.0, 3.0]), None);
    }

    #[test]
    fn test_split_grows_by_one_and_contains_members() {
        let (mut points, mut centroids) = seeded_state();
        let before: Vec<usize> = points.members_of(0);
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        let outcome = split_in_two(&mut points, &mut centroids, 0, None, &mut rng).unwrap();

        assert_eq!(centroids.len(), 3);
        assert_eq!(outcome.retained, 0);
        assert_eq!(outcome.appended, 2);
        // every former member stays within the split pair
        for &i in &before {
            let l = points.label(i);
            assert!(l == outcome.retained || l == outcome.appended);
        }
        // both halves are non-empty for this well-separated cluster
        assert!(!points.members_of(outcome.retained).is_empty());
        assert!(!points.members_of(outcome.appended).is_empty());
        // the singleton cluster is untouched
        assert_eq!(points.label(4), 1);
    }

    #[test]
    fn test_split_separates_distant_pairs() {
        let (mut points, mut centroids) = seeded_state();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        split_in_two(&mut points, &mut centroids, 0, None, &mut rng).unwrap();

        // points 0,1 end up together, points 2,3 end up together
        assert_eq!(points.label(0), points.label(1));
        assert_eq!(points.label(2), points.label(3));
        assert_ne!(points.label(0), points.label(2));
    }

    #[test]
    fn test_split_singleton_fails() {
        let (mut points, mut centroids) = seeded_state();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let result = split_in_two(&mut points, &mut centroids, 1, None, &mut rng);
        assert!(matches!(
            result,
            Err(ClusterError::UnsplittableCluster { cluster: 1, size: 1 })
        ));
    }

    #[test]
    fn test_local_repartition_pulls_strictly_closer_points() {
        // Cluster 1 owns a point that will sit closer to the new pair
        let mut points = PointSet::new(array![
            [0.0, 0.0],
            [0.0, 1.0],
            [10.0, 10.0],
            [10.0, 11.0],
            [11.0, 10.0],
            [100.0, 100.0]
        ])
        .unwrap();
        let mut centroids =
            CentroidSet::from_rows(array![[2.0, 2.0], [30.0, 30.0]]).unwrap();
        // hand-build an imperfect partition: the (11,10) point is stuck in cluster 1
        for (i, l) in [0usize, 0, 0, 0, 1, 1].iter().enumerate() {
            points.set_label(i, *l);
        }

        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let outcome =
            local_repartition_split(&mut points, &mut centroids, 0, None, &mut rng).unwrap();

        // (11,10) is now strictly closer to whichever half holds (10,10)/(10,11)
        let l = points.label(4);
        assert!(l == outcome.retained || l == outcome.appended);
        assert_eq!(outcome.affected, vec![1]);
        // the far point stays put
        assert_eq!(points.label(5), 1);
    }

    #[test]
    fn test_global_split_repartitions_everything() {
        let (mut points, mut centroids) = seeded_state();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        global_split(&mut points, &mut centroids, 0, None, &mut rng).unwrap();

        // after the global Lloyd pass every label matches its nearest centroid
        for i in 0..points.len() {
            let (nearest, _) = crate::distance::nearest_centroid(points.point(i), &centroids);
            assert_eq!(points.label(i), nearest);
        }
    }

    #[test]
    fn test_random_split_reaches_target() {
        let mut points = PointSet::new(array![
            [0.0, 0.0],
            [0.0, 1.0],
            [10.0, 10.0],
            [10.0, 11.0],
            [20.0, 0.0],
            [20.0, 1.0]
        ])
        .unwrap();
        let mut centroids = CentroidSet::from_rows(points.mean().insert_axis(ndarray::Axis(0)))
            .unwrap();
        assign_step(&mut points, &centroids).unwrap();

        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let mut recorder = StepRecorder::new(true, false, None);
        let sse =
            random_split(&mut points, &mut centroids, 3, None, &mut rng, &mut recorder).unwrap();

        assert_eq!(centroids.len(), 3);
        assert!(sse.is_finite());
        let samples = recorder.into_samples();
        assert_eq!(samples.len(), 3); // two splits + the final Lloyd pass
        assert!(samples[0].split_target.is_some());
        assert!(samples[2].split_target.is_none());
    }
}
