use thiserror::Error;

/// Error types for the clustering engine
#[derive(Error, Debug)]
pub enum ClusterError {
    /// The number of clusters k is invalid (must be > 0)
    #[error("Invalid k value: {0}")]
    InvalidK(String),

    /// Not enough data points for the requested operation
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Dimension mismatch between points and centroids
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// The point set contains no points
    #[error("Point set is empty")]
    EmptyPointSet,

    /// A split was attempted on a cluster with fewer than 2 members
    #[error("Cluster {cluster} has {size} member(s), at least 2 are needed to split")]
    UnsplittableCluster { cluster: usize, size: usize },
}
