use crate::data::{CentroidSet, PointSet, UNASSIGNED};
use ndarray::ArrayView1;

/// Squared Euclidean distance between two equal-dimension points.
///
/// All downstream comparisons use the squared form; the root is only taken
/// when a caller explicitly needs the metric distance.
#[inline]
pub fn squared_distance(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "dimension mismatch");
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

/// Euclidean distance between two equal-dimension points
#[inline]
pub fn distance(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    squared_distance(a, b).sqrt()
}

/// Linear scan for the nearest centroid to `point`.
///
/// Ties are broken first-seen (strict `<` comparison), so the result is
/// deterministic for a given centroid order. Returns the winning index and
/// its squared distance.
#[inline]
pub fn nearest_centroid(point: ArrayView1<'_, f64>, centroids: &CentroidSet) -> (usize, f64) {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for j in 0..centroids.len() {
        let d = squared_distance(point, centroids.centroid(j));
        if d < best_dist {
            best_dist = d;
            best = j;
        }
    }
    (best, best_dist)
}

/// Total SSE of the current partition: sum of squared distances from each
/// assigned point to its centroid. Unassigned points contribute nothing.
pub fn sum_squared_error(points: &PointSet, centroids: &CentroidSet) -> f64 {
    let mut sse = 0.0;
    for i in 0..points.len() {
        let label = points.label(i);
        if label == UNASSIGNED {
            continue;
        }
        sse += squared_distance(points.point(i), centroids.centroid(label));
    }
    sse
}

/// SSE contribution of a single cluster
pub fn cluster_sse(points: &PointSet, centroids: &CentroidSet, cluster: usize) -> f64 {
    let mut sse = 0.0;
    for i in 0..points.len() {
        if points.label(i) == cluster {
            sse += squared_distance(points.point(i), centroids.centroid(cluster));
        }
    }
    sse
}
