//! Sample, cluster, unsample.

use tracing::{info, instrument};

use crate::cluster::{ClusteringEngine, ClusteringResult};
use crate::dataset::{Dataset, RawDataset};
use crate::error::Result;
use crate::sampling::{unsample, Notice, Sampler, SamplingConfig};

/// Full-cardinality output of [`cluster_with_sampling`].
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// The dataset the result describes, with every original row.
    pub dataset: RawDataset,
    /// Clustering result with one entry per row of `dataset`.
    pub result: ClusteringResult,
    /// Sampling diagnostics.
    pub notices: Vec<Notice>,
    /// Whether the engine ran on a reduced subset.
    pub sampled: bool,
}

/// Cluster `data` with `engine`, downsampling first when `config` allows it.
///
/// When sampling is skipped the engine sees every row and its result is
/// returned as is. Either way the output covers all `data.n_obs()` rows.
#[instrument(skip_all, fields(n_obs = data.n_obs()))]
pub fn cluster_with_sampling(
    data: &RawDataset,
    engine: &dyn ClusteringEngine,
    config: &SamplingConfig,
) -> Result<PipelineOutput> {
    let outcome = Sampler::new(config.clone()).sample(&Dataset::Raw(data.clone()))?;
    let notices = outcome.notices;

    match outcome.dataset {
        Dataset::Sampled(sampled) => {
            let reduced_result = engine.cluster(sampled.reduced())?;
            let (dataset, result) = unsample(&sampled, &reduced_result)?;
            info!(
                n_reduced = sampled.reduced().n_obs(),
                "clustered reduced dataset"
            );
            Ok(PipelineOutput {
                dataset,
                result,
                notices,
                sampled: true,
            })
        }
        Dataset::Raw(dataset) => {
            let result = engine.cluster(&dataset)?;
            result.check_rows(dataset.n_obs())?;
            info!("clustered full dataset");
            Ok(PipelineOutput {
                dataset,
                result,
                notices,
                sampled: false,
            })
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cluster::CcfKmeans;
    use crate::dataset::MutationType;
    use ndarray::Array2;

    fn clones(n: usize) -> RawDataset {
        // Half the rows near 0.3, half near 0.95.
        let ccf = Array2::from_shape_fn((n, 1), |(i, _)| {
            if i % 2 == 0 {
                0.3 + (i % 7) as f64 * 0.005
            } else {
                0.95 + (i % 5) as f64 * 0.005
            }
        });
        RawDataset::from_fractions(
            vec!["1".into(); n],
            (0..n as u64).collect(),
            ccf,
            vec![MutationType::Point; n],
        )
    }

    #[test]
    fn test_sampled_path_covers_every_row() {
        let data = clones(200);
        let engine = CcfKmeans::new(2).with_seed(5).with_soft_assignments(true);
        let out = cluster_with_sampling(&data, &engine, &SamplingConfig::new(40).with_seed(3))
            .unwrap();

        assert!(out.sampled);
        assert_eq!(out.dataset, data);
        assert_eq!(out.result.best_assignments.len(), 200);
        assert_eq!(out.result.likelihoods.as_ref().unwrap().nrows(), 200);
        assert_eq!(out.result.summary.member_counts.iter().sum::<usize>(), 200);
        // The two clones stay apart after expansion.
        assert_ne!(out.result.best_assignments[0], out.result.best_assignments[1]);
        assert_eq!(out.result.best_assignments[0], out.result.best_assignments[2]);
    }

    #[test]
    fn test_small_dataset_clusters_everything() {
        let data = clones(10);
        let engine = CcfKmeans::new(2).with_seed(5);
        let out = cluster_with_sampling(&data, &engine, &SamplingConfig::new(40)).unwrap();

        assert!(!out.sampled);
        assert_eq!(out.result.best_assignments.len(), 10);
        assert!(matches!(
            out.notices.as_slice(),
            [Notice::InsufficientEligible { eligible: 10, required: 60 }]
        ));
    }
}
