//! Clustering output as consumed by the unsampler.

use std::collections::{HashMap, HashSet};

use ndarray::Array2;

use crate::error::{Error, Result};

/// Per-cluster aggregate table.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterSummary {
    /// Cluster label of each row.
    pub cluster_ids: Vec<usize>,
    /// Number of observations assigned to each cluster.
    pub member_counts: Vec<usize>,
    /// Cluster location per sample (clusters × samples).
    pub locations: Array2<f64>,
}

impl ClusterSummary {
    /// Number of clusters listed.
    pub fn n_clusters(&self) -> usize {
        self.cluster_ids.len()
    }

    /// Row of cluster `id`, if listed.
    pub fn position_of(&self, id: usize) -> Option<usize> {
        self.cluster_ids.iter().position(|&c| c == id)
    }

    /// Member count of cluster `id`, if listed.
    pub fn count_of(&self, id: usize) -> Option<usize> {
        self.position_of(id).and_then(|p| self.member_counts.get(p).copied())
    }

    /// Check that every column has one row per cluster and no id repeats.
    pub fn check(&self) -> Result<()> {
        let n = self.cluster_ids.len();
        let columns = [
            ("member_counts", self.member_counts.len()),
            ("locations", self.locations.nrows()),
        ];
        for (what, found) in columns {
            if found != n {
                return Err(Error::DimensionMismatch {
                    what,
                    expected: n,
                    found,
                });
            }
        }
        let mut seen = HashSet::with_capacity(n);
        if !self.cluster_ids.iter().all(|id| seen.insert(*id)) {
            return Err(Error::InvalidParameter {
                name: "cluster_ids",
                message: "cluster ids must be unique",
            });
        }
        Ok(())
    }

    /// Copy of this table with member counts tallied from `assignments`.
    ///
    /// Listed clusters nobody is assigned to get a count of zero. A label that
    /// is not listed is an error.
    pub fn with_member_counts_from(&self, assignments: &[usize]) -> Result<Self> {
        self.check()?;
        let row_of: HashMap<usize, usize> = self
            .cluster_ids
            .iter()
            .enumerate()
            .map(|(row, &id)| (id, row))
            .collect();

        let mut counts = vec![0usize; self.cluster_ids.len()];
        for (observation, &cluster) in assignments.iter().enumerate() {
            let row = row_of.get(&cluster).ok_or(Error::UnknownCluster {
                cluster,
                observation,
            })?;
            counts[*row] += 1;
        }

        Ok(Self {
            cluster_ids: self.cluster_ids.clone(),
            member_counts: counts,
            locations: self.locations.clone(),
        })
    }
}

/// Output of a clustering engine.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusteringResult {
    /// Most likely cluster label per observation.
    pub best_assignments: Vec<usize>,
    /// Likelihood of the best assignment per observation.
    pub best_likelihoods: Vec<f64>,
    /// Full likelihood over clusters (obs × clusters), when the engine computes it.
    pub likelihoods: Option<Array2<f64>>,
    /// Per-cluster summary.
    pub summary: ClusterSummary,
}

impl ClusteringResult {
    /// Number of observations covered.
    pub fn n_obs(&self) -> usize {
        self.best_assignments.len()
    }

    /// Check that every per-observation field has `n_obs` rows and that the
    /// summary table is well formed.
    pub fn check_rows(&self, n_obs: usize) -> Result<()> {
        let fields = [
            ("best_assignments", self.best_assignments.len()),
            ("best_likelihoods", self.best_likelihoods.len()),
        ];
        for (what, found) in fields {
            if found != n_obs {
                return Err(Error::DimensionMismatch {
                    what,
                    expected: n_obs,
                    found,
                });
            }
        }
        if let Some(lik) = &self.likelihoods {
            if lik.nrows() != n_obs {
                return Err(Error::DimensionMismatch {
                    what: "likelihoods",
                    expected: n_obs,
                    found: lik.nrows(),
                });
            }
        }
        self.summary.check()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use ndarray::array;

    fn summary() -> ClusterSummary {
        ClusterSummary {
            cluster_ids: vec![3, 7],
            member_counts: vec![1, 1],
            locations: array![[0.3], [0.9]],
        }
    }

    #[test]
    fn test_lookup() {
        let s = summary();
        assert_eq!(s.n_clusters(), 2);
        assert_eq!(s.position_of(7), Some(1));
        assert_eq!(s.count_of(3), Some(1));
        assert_eq!(s.count_of(4), None);
    }

    #[test]
    fn test_recount() {
        let s = summary().with_member_counts_from(&[7, 7, 7, 3, 7]).unwrap();
        assert_eq!(s.member_counts, vec![1, 4]);
        assert_eq!(s.locations, summary().locations);
    }

    #[test]
    fn test_recount_zero_for_empty_cluster() {
        let s = summary().with_member_counts_from(&[7, 7]).unwrap();
        assert_eq!(s.member_counts, vec![0, 2]);
    }

    #[test]
    fn test_recount_unknown_label() {
        let err = summary().with_member_counts_from(&[3, 5]).unwrap_err();
        assert_eq!(
            err,
            Error::UnknownCluster {
                cluster: 5,
                observation: 1
            }
        );
    }

    #[test]
    fn test_check_rows() {
        let result = ClusteringResult {
            best_assignments: vec![3, 7],
            best_likelihoods: vec![0.9, 0.8],
            likelihoods: Some(array![[0.9, 0.1], [0.2, 0.8], [0.5, 0.5]]),
            summary: summary(),
        };
        let err = result.check_rows(2).unwrap_err();
        assert!(matches!(
            err,
            Error::DimensionMismatch {
                what: "likelihoods",
                ..
            }
        ));
    }

    #[test]
    fn test_short_member_counts() {
        let mut s = summary();
        s.member_counts.pop();
        assert_eq!(s.count_of(7), None);
        assert_eq!(s.count_of(3), Some(1));

        let result = ClusteringResult {
            best_assignments: vec![3, 7],
            best_likelihoods: vec![0.9, 0.8],
            likelihoods: None,
            summary: s,
        };
        assert_eq!(
            result.check_rows(2).unwrap_err(),
            Error::DimensionMismatch {
                what: "member_counts",
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_locations_row_per_cluster() {
        let mut s = summary();
        s.locations = array![[0.3], [0.9], [0.5]];
        assert!(matches!(
            s.check().unwrap_err(),
            Error::DimensionMismatch {
                what: "locations",
                ..
            }
        ));
    }

    #[test]
    fn test_duplicate_cluster_ids_rejected() {
        let s = ClusterSummary {
            cluster_ids: vec![3, 3],
            member_counts: vec![1, 1],
            locations: array![[0.3], [0.9]],
        };
        assert!(matches!(
            s.with_member_counts_from(&[3, 3]).unwrap_err(),
            Error::InvalidParameter {
                name: "cluster_ids",
                ..
            }
        ));
    }
}
