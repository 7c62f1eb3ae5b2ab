use crate::data::{CentroidSet, PointSet, UNASSIGNED};
use crate::distance::{nearest_centroid, sum_squared_error};
use crate::error::ClusterError;
use ndarray::Array2;

/// Partition step: write each point's nearest-centroid index into its label.
///
/// Linear scan per point with strict `<` comparison, so exact ties go to the
/// lower centroid index. O(n·k).
pub fn assign(points: &mut PointSet, centroids: &CentroidSet) -> Result<(), ClusterError> {
    if points.dims() != centroids.dims() {
        return Err(ClusterError::DimensionMismatch(format!(
            "points have {} dimensions, centroids have {}",
            points.dims(),
            centroids.dims()
        )));
    }
    for i in 0..points.len() {
        let (best, _) = nearest_centroid(points.point(i), centroids);
        points.set_label(i, best);
    }
    Ok(())
}

/// Centroid step: move each centroid to the mean of its assigned points.
///
/// A cluster with zero assigned points keeps its previous coordinates; empty
/// clusters are deliberately not reseeded here, callers compensate (e.g. via
/// local repartition) when they care.
pub fn update_centroids(centroids: &mut CentroidSet, points: &PointSet) {
    let k = centroids.len();
    let dims = centroids.dims();

    let mut sums: Array2<f64> = Array2::zeros((k, dims));
    let mut counts = vec![0usize; k];

    for i in 0..points.len() {
        let label = points.label(i);
        if label == UNASSIGNED {
            continue;
        }
        counts[label] += 1;
        let point = points.point(i);
        for j in 0..dims {
            sums[[label, j]] += point[j];
        }
    }

    for c in 0..k {
        if counts[c] > 0 {
            let count = counts[c] as f64;
            let mut row = sums.row_mut(c);
            row.mapv_inplace(|v| v / count);
            centroids.set_centroid(c, sums.row(c));
        }
    }
}

/// Lloyd's iteration: alternate [`assign`] and [`update_centroids`], tracking
/// SSE, until the SSE stops strictly improving or the iteration cap is hit.
///
/// Always performs at least one assignment+update pass. Returns the best SSE
/// observed; the sequence is non-increasing by construction, and the loop
/// exits at the first non-improvement, so the returned value is never worse
/// than any intermediate one. This is single-pass early stopping, not
/// convergence to a fixpoint; the final state may still admit reassignments.
pub fn lloyd(
    points: &mut PointSet,
    centroids: &mut CentroidSet,
    max_iterations: Option<usize>,
) -> Result<f64, ClusterError> {
    let mut best = f64::INFINITY;
    let mut iteration = 0;
    loop {
        assign(points, centroids)?;
        update_centroids(centroids, points);
        let sse = sum_squared_error(points, centroids);
        if sse < best {
            best = sse;
        } else {
            break;
        }
        iteration += 1;
        if let Some(cap) = max_iterations {
            if iteration >= cap {
                break;
            }
        }
    }
    Ok(best)
}
