//! Downsampling and re-expansion.
//!
//! Clustering engines scale poorly with the number of observations. This
//! module lets a pipeline cluster a bounded subset and still report an
//! assignment for every observation:
//!
//! ```text
//! full ──eligibility──▶ eligible ──strategy──▶ selection (+ CNA rows)
//!   │                                              │
//!   └────────── similarity mapper ◀────────────────┘
//!                       │
//!                       ▼
//!          SampledDataset { reduced, full_data, most_similar }
//!                       │  cluster(reduced)
//!                       ▼
//!          unsample ──▶ (full dataset, result with N_full rows)
//! ```
//!
//! ## No-ops
//!
//! Sampling returns the input unchanged, with a [`Notice`], when the dataset
//! is already sampled, when fewer than `floor(min_factor * target_count)`
//! observations are eligible, when the strategy name is not recognised, or
//! when the selection comes out empty. These are diagnostics, not errors.
//!
//! ## Usage
//!
//! ```rust
//! use ndarray::Array2;
//! use subsample::dataset::{Dataset, MutationType, RawDataset};
//! use subsample::sampling::{sample, SamplingConfig};
//!
//! let ccf = Array2::from_shape_fn((100, 1), |(i, _)| i as f64 / 100.0);
//! let raw = RawDataset::from_fractions(
//!     vec!["1".into(); 100],
//!     (0..100).collect(),
//!     ccf,
//!     vec![MutationType::Point; 100],
//! );
//!
//! let config = SamplingConfig::new(20).with_seed(42);
//! let outcome = sample(&Dataset::from(raw), &config).unwrap();
//! let sampled = outcome.dataset.as_sampled().unwrap();
//! assert_eq!(sampled.reduced().n_obs(), 20);
//! assert_eq!(sampled.most_similar().len(), 100);
//! ```

mod config;
mod eligibility;
mod notice;
mod sampler;
mod similarity;
mod strategy;
mod traits;
mod unsampler;

pub use config::{SamplingConfig, DEFAULT_MIN_FACTOR, SUBCLONAL_CCF_THRESHOLD};
pub use eligibility::eligible_indices;
pub use notice::Notice;
pub use sampler::{sample, SampleOutcome, Sampler};
pub use similarity::most_similar_map;
pub use strategy::{StrategyKind, SubclonalOnly, Uniform};
pub use traits::{Selection, SelectionStrategy};
pub use unsampler::{unsample, unsample_dataset};
