//! Clustering results and the engines that produce them.
//!
//! The clustering algorithm itself sits outside this crate's concern: any
//! [`ClusteringEngine`] can run on a sampled dataset's reduced rows. What the
//! unsampler needs is the *shape* of the output, captured by
//! [`ClusteringResult`]:
//!
//! | Field | Rows | Expanded by |
//! |-------|------|-------------|
//! | `best_assignments` | obs | back-map lookup |
//! | `best_likelihoods` | obs | back-map lookup |
//! | `likelihoods` (optional) | obs × clusters | back-map lookup, only when present |
//! | `summary` | clusters | member counts re-tallied |
//!
//! [`CcfKmeans`] is a small reference engine over cellular fractions.
//!
//! ## Usage
//!
//! ```rust
//! use ndarray::array;
//! use subsample::cluster::{CcfKmeans, ClusteringEngine};
//! use subsample::dataset::{MutationType, RawDataset};
//!
//! let data = RawDataset::from_fractions(
//!     vec!["1".into(); 4],
//!     vec![10, 20, 30, 40],
//!     array![[0.2], [0.21], [0.95], [0.96]],
//!     vec![MutationType::Point; 4],
//! );
//! let result = CcfKmeans::new(2).with_seed(42).cluster(&data).unwrap();
//! assert_eq!(result.best_assignments[0], result.best_assignments[1]);
//! assert_ne!(result.best_assignments[0], result.best_assignments[2]);
//! ```

mod kmeans;
mod result;
mod traits;

pub use kmeans::CcfKmeans;
pub use result::{ClusterSummary, ClusteringResult};
pub use traits::ClusteringEngine;
