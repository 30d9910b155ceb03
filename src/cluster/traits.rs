//! Clustering engine trait.

use super::ClusteringResult;
use crate::dataset::RawDataset;
use crate::error::Result;

/// Anything that clusters the observations of a dataset.
///
/// The sampler hands engines the reduced rows; the unsampler expands whatever
/// they return back onto the full dataset.
pub trait ClusteringEngine {
    /// Cluster every row of `data`.
    ///
    /// The result must have one entry per row in every per-observation field
    /// and list every assigned label in its summary table.
    fn cluster(&self, data: &RawDataset) -> Result<ClusteringResult>;
}
