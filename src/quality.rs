//! Centroid Index: a coarse, assignment-independent measure of structural
//! agreement between two centroid sets. CI == 0 iff the sets form a perfect
//! bijection under nearest-neighbor matching, and is the primary success
//! signal against ground truth regardless of SSE scale.

use crate::data::CentroidSet;
use crate::distance::squared_distance;

/// For every centroid in `a`, find its nearest centroid in `b` (ties broken
/// first-seen) and count how many centroids in `b` were never the nearest
/// match for any centroid in `a`.
pub fn orphan_count(a: &CentroidSet, b: &CentroidSet) -> usize {
    let mut matched = vec![false; b.len()];
    for i in 0..a.len() {
        let mut best = 0;
        let mut best_dist = f64::INFINITY;
        for j in 0..b.len() {
            let d = squared_distance(a.centroid(i), b.centroid(j));
            if d < best_dist {
                best_dist = d;
                best = j;
            }
        }
        matched[best] = true;
    }
    matched.iter().filter(|&&m| !m).count()
}

/// Centroid Index between two centroid sets:
/// `max(orphan_count(a, b), orphan_count(b, a))`. Symmetric by construction.
pub fn centroid_index(a: &CentroidSet, b: &CentroidSet) -> usize {
    orphan_count(a, b).max(orphan_count(b, a))
}
