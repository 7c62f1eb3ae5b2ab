use crate::error::ClusterError;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

/// Sentinel label for a point that has not been assigned to any cluster.
pub const UNASSIGNED: usize = usize::MAX;

/// A fixed-size collection of points sharing one dimensionality.
///
/// The coordinate matrix never changes after construction; clustering only
/// mutates the per-point cluster labels.
#[derive(Debug, Clone)]
pub struct PointSet {
    coords: Array2<f64>,
    labels: Vec<usize>,
}

impl PointSet {
    /// Wrap a (n_points, n_dims) coordinate matrix, all points unassigned.
    pub fn new(coords: Array2<f64>) -> Result<Self, ClusterError> {
        if coords.nrows() == 0 {
            return Err(ClusterError::EmptyPointSet);
        }
        if coords.ncols() == 0 {
            return Err(ClusterError::DimensionMismatch(
                "points must have at least one dimension".to_string(),
            ));
        }
        let labels = vec![UNASSIGNED; coords.nrows()];
        Ok(Self { coords, labels })
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.coords.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.nrows() == 0
    }

    /// Dimensionality shared by all points
    pub fn dims(&self) -> usize {
        self.coords.ncols()
    }

    /// Coordinates of point `i`
    pub fn point(&self, i: usize) -> ArrayView1<'_, f64> {
        self.coords.row(i)
    }

    /// Full coordinate matrix
    pub fn coords(&self) -> ArrayView2<'_, f64> {
        self.coords.view()
    }

    /// Cluster label of point `i` (`UNASSIGNED` if not yet assigned)
    pub fn label(&self, i: usize) -> usize {
        self.labels[i]
    }

    pub fn set_label(&mut self, i: usize, label: usize) {
        self.labels[i] = label;
    }

    /// All cluster labels, indexed by point
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Indices of the points currently assigned to `cluster`
    pub fn members_of(&self, cluster: usize) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter(|(_, &l)| l == cluster)
            .map(|(i, _)| i)
            .collect()
    }

    /// Deep-copy the given points into a new, unassigned point set.
    /// Row `i` of the subset is `indices[i]` of `self`.
    pub fn subset(&self, indices: &[usize]) -> Self {
        let mut coords = Array2::zeros((indices.len(), self.dims()));
        for (local, &global) in indices.iter().enumerate() {
            coords.row_mut(local).assign(&self.coords.row(global));
        }
        Self {
            coords,
            labels: vec![UNASSIGNED; indices.len()],
        }
    }

    /// Element-wise mean over all points
    pub fn mean(&self) -> Array1<f64> {
        // nrows >= 1 is a construction invariant
        self.coords.mean_axis(Axis(0)).unwrap_or_else(|| Array1::zeros(self.dims()))
    }
}

/// An ordered collection of cluster representatives.
///
/// Unlike [`PointSet`], its size changes during splitting (grows by exactly
/// one per split); indices at or below the split pair remain stable across an
/// append.
#[derive(Debug, Clone, PartialEq)]
pub struct CentroidSet {
    coords: Array2<f64>,
}

impl CentroidSet {
    /// Wrap a (k, n_dims) coordinate matrix; at least one centroid is required.
    pub fn from_rows(coords: Array2<f64>) -> Result<Self, ClusterError> {
        if coords.nrows() == 0 {
            return Err(ClusterError::InvalidK(
                "a centroid set needs at least one centroid".to_string(),
            ));
        }
        Ok(Self { coords })
    }

    /// Number of centroids
    pub fn len(&self) -> usize {
        self.coords.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.nrows() == 0
    }

    /// Dimensionality of every centroid
    pub fn dims(&self) -> usize {
        self.coords.ncols()
    }

    /// Coordinates of centroid `j`
    pub fn centroid(&self, j: usize) -> ArrayView1<'_, f64> {
        self.coords.row(j)
    }

    /// Full coordinate matrix
    pub fn coords(&self) -> ArrayView2<'_, f64> {
        self.coords.view()
    }

    /// Overwrite centroid `j` in place
    pub fn set_centroid(&mut self, j: usize, row: ArrayView1<'_, f64>) {
        self.coords.row_mut(j).assign(&row);
    }

    /// Append one centroid and return its index (always the new last index).
    pub fn push(&mut self, row: ArrayView1<'_, f64>) -> Result<usize, ClusterError> {
        self.coords.push_row(row).map_err(|_| {
            ClusterError::DimensionMismatch(format!(
                "cannot append a {}-dimensional centroid to a {}-dimensional set",
                row.len(),
                self.dims()
            ))
        })?;
        Ok(self.coords.nrows() - 1)
    }
}

/// Outcome of one clustering run: the best SSE the driver observed, the final
/// assignment, and the centroid set that produced it.
#[derive(Debug, Clone)]
pub struct ClusteringResult {
    pub centroids: CentroidSet,
    pub labels: Vec<usize>,
    pub sse: f64,
    /// Per-step samples; empty unless `track_progress` was enabled.
    pub samples: Vec<crate::stats::StepSample>,
}

/// An immutable copy of the committed clustering state.
///
/// Used by trial-and-rollback loops (random swap): capture before the
/// perturbation, restore exactly on rejection.
#[derive(Debug, Clone)]
pub struct Snapshot {
    centroids: Array2<f64>,
    labels: Vec<usize>,
}

impl Snapshot {
    pub fn capture(points: &PointSet, centroids: &CentroidSet) -> Self {
        Self {
            centroids: centroids.coords.clone(),
            labels: points.labels.clone(),
        }
    }

    /// Restore both centroid coordinates and point labels exactly as captured.
    pub fn restore(&self, points: &mut PointSet, centroids: &mut CentroidSet) {
        centroids.coords.assign(&self.centroids);
        points.labels.copy_from_slice(&self.labels);
    }
}
