//! # subsample
//!
//! Downsample a mutation dataset for expensive clustering, then re-expand the
//! clustering result onto every original observation.
//!
//! Three index spaces are in play: the full dataset, the sampling-eligible
//! subset, and the final reduced rows (selection plus always-kept copy-number
//! pseudo-observations). The sampler records a back-map from every full row
//! to its most similar reduced row; the unsampler uses it to give every
//! observation a cluster.
//!
//! ```rust
//! use ndarray::Array2;
//! use subsample::cluster::{CcfKmeans, ClusteringEngine};
//! use subsample::dataset::{Dataset, MutationType, RawDataset};
//! use subsample::sampling::{sample, unsample, SamplingConfig};
//!
//! let ccf = Array2::from_shape_fn((60, 1), |(i, _)| if i < 30 { 0.3 } else { 0.9 });
//! let raw = RawDataset::from_fractions(
//!     vec!["1".into(); 60],
//!     (0..60).collect(),
//!     ccf,
//!     vec![MutationType::Point; 60],
//! );
//!
//! let outcome = sample(&Dataset::from(raw), &SamplingConfig::new(10).with_seed(1))?;
//! let sampled = outcome.dataset.as_sampled()?;
//! let reduced_result = CcfKmeans::new(1).cluster(sampled.reduced())?;
//! let (full, result) = unsample(sampled, &reduced_result)?;
//! assert_eq!(full.n_obs(), 60);
//! assert_eq!(result.summary.member_counts, vec![60]);
//! # Ok::<(), subsample::Error>(())
//! ```
//!
//! Logging goes through `tracing`; install a subscriber to see it.

pub mod cluster;
pub mod dataset;
/// Error types used across `subsample`.
pub mod error;
pub mod pipeline;
pub mod sampling;


pub use cluster::{CcfKmeans, ClusterSummary, ClusteringEngine, ClusteringResult};
pub use dataset::{
    CnaSegment, ConflictMatrix, Dataset, MutationType, Phase, RawDataset, SampledDataset,
};
pub use error::{Error, Result};
pub use pipeline::{cluster_with_sampling, PipelineOutput};
pub use sampling::{
    eligible_indices, most_similar_map, sample, unsample, unsample_dataset, Notice,
    SampleOutcome, Sampler, SamplingConfig, SelectionStrategy, StrategyKind, SubclonalOnly,
    Uniform,
};
