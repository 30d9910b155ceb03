//! Unsampling orchestrator.
//!
//! Expands a clustering result computed on a sampled dataset's reduced rows
//! back onto every row of the full snapshot. Row `i` of the full dataset takes
//! the assignment, best likelihood and (when present) likelihood row of
//! reduced row `most_similar[i]`. Cluster member counts are re-tallied from
//! the expanded assignments; the rest of the summary passes through.

use ndarray::Axis;
use tracing::{debug, instrument};

use crate::cluster::ClusteringResult;
use crate::dataset::{Dataset, RawDataset, SampledDataset};
use crate::error::Result;

/// Expand `result` to the full dataset and recover the pre-sampling dataset.
///
/// Both outputs have exactly `sampled.n_full()` rows. Neither input is modified.
#[instrument(skip_all, fields(n_full = sampled.n_full(), n_reduced = sampled.reduced().n_obs()))]
pub fn unsample(
    sampled: &SampledDataset,
    result: &ClusteringResult,
) -> Result<(RawDataset, ClusteringResult)> {
    result.check_rows(sampled.reduced().n_obs())?;
    let back_map = sampled.most_similar();

    let best_assignments: Vec<usize> = back_map
        .iter()
        .map(|&r| result.best_assignments[r])
        .collect();
    let summary = result.summary.with_member_counts_from(&best_assignments)?;
    let best_likelihoods = back_map
        .iter()
        .map(|&r| result.best_likelihoods[r])
        .collect();
    // Engines that do not compute the full matrix leave it unset; so do we.
    let likelihoods = result
        .likelihoods
        .as_ref()
        .map(|lik| lik.select(Axis(0), back_map));

    let mut recovered = sampled.full_data().clone();
    recovered.cna_segments = sampled.reduced().cna_segments.clone();

    debug!(
        n_clusters = summary.n_clusters(),
        has_likelihoods = likelihoods.is_some(),
        "expanded clustering result"
    );

    Ok((
        recovered,
        ClusteringResult {
            best_assignments,
            best_likelihoods,
            likelihoods,
            summary,
        },
    ))
}

/// [`unsample`] for code holding a [`Dataset`]; fails on a raw dataset.
pub fn unsample_dataset(
    dataset: &Dataset,
    result: &ClusteringResult,
) -> Result<(RawDataset, ClusteringResult)> {
    unsample(dataset.as_sampled()?, result)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cluster::ClusterSummary;
    use crate::dataset::MutationType;
    use crate::error::Error;
    use ndarray::{array, Array2};

    fn sampled_ladder() -> SampledDataset {
        let ccf = Array2::from_shape_fn((6, 1), |(i, _)| (i + 1) as f64 / 10.0);
        let full = RawDataset::from_fractions(
            vec!["1".into(); 6],
            (1..=6).collect(),
            ccf,
            vec![MutationType::Point; 6],
        );
        // Keep 0.2 and 0.5.
        let selection = vec![1, 4];
        let reduced = full.select_rows(&selection);
        SampledDataset::new(reduced, selection, full, vec![0, 0, 0, 1, 1, 1])
    }

    fn reduced_result(with_matrix: bool) -> ClusteringResult {
        ClusteringResult {
            best_assignments: vec![2, 5],
            best_likelihoods: vec![0.9, 0.7],
            likelihoods: with_matrix.then(|| array![[0.9, 0.1], [0.3, 0.7]]),
            summary: ClusterSummary {
                cluster_ids: vec![2, 5],
                member_counts: vec![1, 1],
                locations: array![[0.2], [0.5]],
            },
        }
    }

    #[test]
    fn test_expands_every_field() {
        let (recovered, expanded) = unsample(&sampled_ladder(), &reduced_result(true)).unwrap();

        assert_eq!(recovered.n_obs(), 6);
        assert_eq!(expanded.best_assignments, vec![2, 2, 2, 5, 5, 5]);
        assert_eq!(expanded.best_likelihoods, vec![0.9, 0.9, 0.9, 0.7, 0.7, 0.7]);
        let lik = expanded.likelihoods.unwrap();
        assert_eq!(lik.dim(), (6, 2));
        assert_eq!(lik.row(0), array![0.9, 0.1].view());
        assert_eq!(lik.row(5), array![0.3, 0.7].view());
    }

    #[test]
    fn test_member_counts_retallied() {
        let (_, expanded) = unsample(&sampled_ladder(), &reduced_result(false)).unwrap();
        assert_eq!(expanded.summary.member_counts, vec![3, 3]);
        assert_eq!(expanded.summary.cluster_ids, vec![2, 5]);
        assert_eq!(expanded.summary.locations, array![[0.2], [0.5]]);
    }

    #[test]
    fn test_missing_matrix_stays_missing() {
        let (_, expanded) = unsample(&sampled_ladder(), &reduced_result(false)).unwrap();
        assert!(expanded.likelihoods.is_none());
    }

    #[test]
    fn test_inputs_untouched() {
        let sampled = sampled_ladder();
        let result = reduced_result(true);
        let _ = unsample(&sampled, &result).unwrap();
        assert_eq!(sampled, sampled_ladder());
        assert_eq!(result, reduced_result(true));
    }

    #[test]
    fn test_wrong_row_count_rejected() {
        let mut result = reduced_result(false);
        result.best_likelihoods.push(0.1);
        let err = unsample(&sampled_ladder(), &result).unwrap_err();
        assert!(matches!(
            err,
            Error::DimensionMismatch {
                what: "best_likelihoods",
                expected: 2,
                found: 3
            }
        ));
    }

    #[test]
    fn test_raw_dataset_fails_fast() {
        let raw = Dataset::from(sampled_ladder().full_data().clone());
        let err = unsample_dataset(&raw, &reduced_result(false)).unwrap_err();
        assert!(matches!(err, Error::NotSampled { .. }));
    }

    #[test]
    fn test_duplicate_cluster_ids_rejected() {
        // Counts would otherwise all land on the last duplicate.
        let mut result = reduced_result(false);
        result.summary.cluster_ids = vec![2, 2];
        result.best_assignments = vec![2, 2];
        let err = unsample(&sampled_ladder(), &result).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name: "cluster_ids", .. }));
    }
}
