use crate::data::{CentroidSet, PointSet};
use crate::distance::squared_distance;
use crate::error::ClusterError;
use ndarray::Array2;
use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

fn check_seed_args(k: usize, points: &PointSet) -> Result<(), ClusterError> {
    if k == 0 {
        return Err(ClusterError::InvalidK("k must be greater than 0".to_string()));
    }
    if points.len() < k {
        return Err(ClusterError::InsufficientData(format!(
            "number of points ({}) is less than k ({})",
            points.len(),
            k
        )));
    }
    Ok(())
}

fn copy_rows(points: &PointSet, indices: &[usize]) -> Array2<f64> {
    let mut coords = Array2::zeros((indices.len(), points.dims()));
    for (row, &idx) in indices.iter().enumerate() {
        coords.row_mut(row).assign(&points.point(idx));
    }
    coords
}

/// Seed k centroids from k distinct points chosen uniformly without
/// replacement, deep-copied out of the point set.
pub fn random_seed(
    k: usize,
    points: &PointSet,
    rng: &mut ChaCha8Rng,
) -> Result<CentroidSet, ClusterError> {
    check_seed_args(k, points)?;

    let indices: Vec<usize> = (0..points.len()).collect();
    let selected: Vec<usize> = indices.choose_multiple(rng, k).cloned().collect();

    CentroidSet::from_rows(copy_rows(points, &selected))
}

/// k-means++ weighted seeding.
///
/// The first centroid is uniform; each subsequent one is drawn with
/// probability proportional to its squared distance to the nearest centroid
/// chosen so far (roulette wheel over the cached distances). A draw landing
/// on an already-chosen point (cached distance exactly 0) is resampled.
/// Produces exactly k distinct centroids, or `InsufficientData` when the
/// point set holds fewer than k distinct points.
pub fn kmeans_pp_seed(
    k: usize,
    points: &PointSet,
    rng: &mut ChaCha8Rng,
) -> Result<CentroidSet, ClusterError> {
    check_seed_args(k, points)?;

    let n = points.len();
    let first = rng.gen_range(0..n);
    let mut chosen = vec![first];

    // Per-point squared distance to the nearest chosen centroid so far
    let mut nearest: Vec<f64> = (0..n)
        .map(|i| squared_distance(points.point(i), points.point(first)))
        .collect();

    while chosen.len() < k {
        let total: f64 = nearest.iter().sum();
        if total <= 0.0 {
            return Err(ClusterError::InsufficientData(format!(
                "only {} distinct point(s) available for k = {}",
                chosen.len(),
                k
            )));
        }

        let next = loop {
            let mut r = rng.gen::<f64>() * total;
            let mut candidate = n - 1;
            for (i, &w) in nearest.iter().enumerate() {
                if r < w {
                    candidate = i;
                    break;
                }
                r -= w;
            }
            // zero cache means the candidate is already a centroid; resample
            if nearest[candidate] > 0.0 {
                break candidate;
            }
        };
        chosen.push(next);

        for i in 0..n {
            let d = squared_distance(points.point(i), points.point(next));
            if d < nearest[i] {
                nearest[i] = d;
            }
        }
    }

    CentroidSet::from_rows(copy_rows(points, &chosen))
}
