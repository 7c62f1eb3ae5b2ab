//! # splitkmeans-rs
//!
//! Clustering-quality heuristics on multi-dimensional point sets: classic
//! Lloyd's k-means, repeated k-means, random-swap local search, and a family
//! of split-based growth strategies (random split, SSE-greedy split in three
//! partitioning variants, bisecting k-means), evaluated with the Centroid
//! Index structural quality metric.
//!
//! ## Features
//!
//! - **One engine, eight algorithms**: select via [`Algorithm`] and run them
//!   all through the same [`ClusterEngine`] interface
//! - **Centroid Index**: assignment-independent structural comparison against
//!   a ground-truth centroid set ([`centroid_index`])
//! - **Reproducible**: every run is driven by a single seeded ChaCha RNG
//! - **Progress samples**: optional per-step `(iteration, k, SSE, CI, time)`
//!   records for external logging
//!
//! ## Example
//!
//! ```rust
//! use splitkmeans_rs::{Algorithm, ClusterEngine, EngineConfig, PointSet, SplitVariant};
//! use ndarray::array;
//!
//! let data = array![
//!     [0.0, 0.0], [0.0, 1.0],
//!     [10.0, 10.0], [10.0, 11.0],
//!     [20.0, 0.0], [20.0, 1.0],
//! ];
//! let mut points = PointSet::new(data).unwrap();
//!
//! let config = EngineConfig::new(3)
//!     .with_algorithm(Algorithm::GreedySplit(SplitVariant::LocalRepartition))
//!     .with_seed(42);
//! let mut engine = ClusterEngine::new(config);
//!
//! let result = engine.run(&mut points, None).unwrap();
//! assert_eq!(result.centroids.len(), 3);
//! assert!(result.sse < 2.0);
//! ```
//!
//! ## Comparing against ground truth
//!
//! ```rust
//! use splitkmeans_rs::{centroid_index, CentroidSet};
//! use ndarray::array;
//!
//! let truth = CentroidSet::from_rows(array![[0.0, 0.0], [10.0, 10.0]]).unwrap();
//! let found = CentroidSet::from_rows(array![[0.1, 0.0], [9.9, 10.1]]).unwrap();
//! assert_eq!(centroid_index(&truth, &found), 0);
//! ```

mod algorithm;
mod bisecting;
mod config;
mod data;
mod distance;
mod error;
mod greedy;
mod init;
mod kmeans;
mod quality;
mod split;
mod stats;
mod swap;

pub use config::{Algorithm, EngineConfig, InitMethod, SplitVariant, Verbosity};
pub use data::{CentroidSet, ClusteringResult, PointSet, Snapshot, UNASSIGNED};
pub use error::ClusterError;
pub use kmeans::ClusterEngine;
pub use quality::{centroid_index, orphan_count};
pub use stats::{RunStats, StepSample};
