//! K-means over cellular fractions.
//!
//! A reference [`ClusteringEngine`]: it partitions observations by their
//! per-sample cellular fractions, minimising within-cluster sum of squares:
//!
//! ```text
//! WCSS = Σₖ Σᵢ∈Cₖ ||ccfᵢ - μₖ||²
//! ```
//!
//! Centroids start from k-means++ and follow Lloyd's iterations. The engine
//! makes no attempt to model read counts or copy number; it exists so the
//! sample → cluster → unsample path can be driven end to end.
//!
//! # Likelihoods
//!
//! Per-observation likelihoods are Gaussian responsibilities with a shared
//! bandwidth `σ`:
//!
//! ```text
//! Lᵢₖ = exp(-||ccfᵢ - μₖ||² / 2σ²) / Σⱼ exp(-||ccfᵢ - μⱼ||² / 2σ²)
//! ```
//!
//! The best likelihood is always reported. The full matrix is only filled
//! with [`CcfKmeans::with_soft_assignments`], mirroring engines that cannot
//! produce it.

use ndarray::{Array2, ArrayView1};
use rand::prelude::*;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::traits::ClusteringEngine;
use super::{ClusterSummary, ClusteringResult};
use crate::dataset::RawDataset;
use crate::error::{Error, Result};

/// K-means clustering of the cellular-fraction matrix.
#[derive(Debug, Clone)]
pub struct CcfKmeans {
    /// Number of clusters.
    k: usize,
    /// Maximum iterations.
    max_iter: usize,
    /// Convergence tolerance on total centroid shift.
    tol: f64,
    /// Responsibility bandwidth.
    bandwidth: f64,
    /// Fill the full likelihood matrix.
    soft: bool,
    /// Random seed.
    seed: Option<u64>,
}

impl CcfKmeans {
    /// Create a new engine with `k` clusters.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iter: 100,
            tol: 1e-8,
            bandwidth: 0.1,
            soft: false,
            seed: None,
        }
    }

    /// Set maximum iterations.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set convergence tolerance.
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Set the responsibility bandwidth `σ`.
    pub fn with_bandwidth(mut self, bandwidth: f64) -> Self {
        self.bandwidth = bandwidth;
        self
    }

    /// Also report the full likelihood matrix.
    pub fn with_soft_assignments(mut self, soft: bool) -> Self {
        self.soft = soft;
        self
    }

    /// Set random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of clusters.
    pub fn n_clusters(&self) -> usize {
        self.k
    }

    fn squared_distance(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
        a.iter().zip(b.iter()).map(|(x, y)| (x - y).powi(2)).sum()
    }

    fn nearest(point: ArrayView1<'_, f64>, centroids: &Array2<f64>) -> usize {
        let mut best_cluster = 0;
        let mut best_dist = f64::MAX;
        for (k, centroid) in centroids.rows().into_iter().enumerate() {
            let dist = Self::squared_distance(point, centroid);
            if dist < best_dist {
                best_dist = dist;
                best_cluster = k;
            }
        }
        best_cluster
    }

    /// k-means++ seeding.
    fn init_centroids(&self, data: &Array2<f64>, rng: &mut impl Rng) -> Array2<f64> {
        let n = data.nrows();
        let mut centroids = Array2::zeros((self.k, data.ncols()));

        let first = rng.random_range(0..n);
        centroids.row_mut(0).assign(&data.row(first));

        for i in 1..self.k {
            let distances: Vec<f64> = data
                .rows()
                .into_iter()
                .map(|point| {
                    (0..i)
                        .map(|c| Self::squared_distance(point, centroids.row(c)))
                        .fold(f64::MAX, f64::min)
                })
                .collect();

            let total: f64 = distances.iter().sum();
            if total == 0.0 {
                let idx = rng.random_range(0..n);
                centroids.row_mut(i).assign(&data.row(idx));
                continue;
            }

            let threshold = rng.random::<f64>() * total;
            let mut cumsum = 0.0;
            let mut selected = n - 1;
            for (j, &d) in distances.iter().enumerate() {
                cumsum += d;
                if cumsum >= threshold {
                    selected = j;
                    break;
                }
            }
            centroids.row_mut(i).assign(&data.row(selected));
        }

        centroids
    }

    /// Row-normalised Gaussian responsibilities (obs × clusters).
    fn responsibilities(&self, data: &Array2<f64>, centroids: &Array2<f64>) -> Array2<f64> {
        let scale = 2.0 * self.bandwidth * self.bandwidth;
        let mut resp = Array2::zeros((data.nrows(), self.k));
        for (i, point) in data.rows().into_iter().enumerate() {
            let d2: Vec<f64> = centroids
                .rows()
                .into_iter()
                .map(|c| Self::squared_distance(point, c))
                .collect();
            // Shift by the minimum so the nearest centroid has weight 1 before normalising.
            let min = d2.iter().copied().fold(f64::INFINITY, f64::min);
            let weights: Vec<f64> = d2.iter().map(|d| (-(d - min) / scale).exp()).collect();
            let total: f64 = weights.iter().sum();
            for (k, w) in weights.into_iter().enumerate() {
                resp[[i, k]] = w / total;
            }
        }
        resp
    }
}

impl ClusteringEngine for CcfKmeans {
    fn cluster(&self, data: &RawDataset) -> Result<ClusteringResult> {
        let ccf = &data.subclonal_fraction;
        let n = ccf.nrows();
        let d = ccf.ncols();

        if n == 0 || d == 0 {
            return Err(Error::EmptyInput);
        }
        if self.k == 0 || self.k > n {
            return Err(Error::InvalidClusterCount {
                requested: self.k,
                n_items: n,
            });
        }
        if !(self.bandwidth > 0.0 && self.bandwidth.is_finite()) {
            return Err(Error::InvalidParameter {
                name: "bandwidth",
                message: "must be positive and finite",
            });
        }
        if ccf.iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidParameter {
                name: "subclonal_fraction",
                message: "k-means requires finite cellular fractions",
            });
        }

        let mut rng: Box<dyn RngCore> = match self.seed {
            Some(s) => Box::new(StdRng::seed_from_u64(s)),
            None => Box::new(rand::rng()),
        };

        let mut centroids = self.init_centroids(ccf, &mut rng);
        let mut labels = vec![0usize; n];

        for _iter in 0..self.max_iter {
            #[cfg(feature = "parallel")]
            {
                let centroids_ref = &centroids;
                labels.par_iter_mut().enumerate().for_each(|(i, label)| {
                    *label = Self::nearest(ccf.row(i), centroids_ref);
                });
            }

            #[cfg(not(feature = "parallel"))]
            for (i, label) in labels.iter_mut().enumerate() {
                *label = Self::nearest(ccf.row(i), &centroids);
            }

            let mut new_centroids = Array2::<f64>::zeros((self.k, d));
            let mut counts = vec![0usize; self.k];
            for (i, &k) in labels.iter().enumerate() {
                let mut row = new_centroids.row_mut(k);
                row += &ccf.row(i);
                counts[k] += 1;
            }
            for (k, &count) in counts.iter().enumerate() {
                if count > 0 {
                    new_centroids.row_mut(k).mapv_inplace(|v| v / count as f64);
                } else {
                    // Empty cluster: reinitialise randomly
                    let idx = rng.random_range(0..n);
                    new_centroids.row_mut(k).assign(&ccf.row(idx));
                }
            }

            let shift: f64 = centroids
                .iter()
                .zip(new_centroids.iter())
                .map(|(a, b)| (a - b).powi(2))
                .sum();
            centroids = new_centroids;
            if shift < self.tol {
                break;
            }
        }

        // Final assignment against the converged centroids.
        for (i, label) in labels.iter_mut().enumerate() {
            *label = Self::nearest(ccf.row(i), &centroids);
        }

        let resp = self.responsibilities(ccf, &centroids);
        let best_likelihoods = labels
            .iter()
            .enumerate()
            .map(|(i, &k)| resp[[i, k]])
            .collect();

        let mut member_counts = vec![0usize; self.k];
        for &k in &labels {
            member_counts[k] += 1;
        }

        Ok(ClusteringResult {
            best_assignments: labels,
            best_likelihoods,
            likelihoods: self.soft.then_some(resp),
            summary: ClusterSummary {
                cluster_ids: (0..self.k).collect(),
                member_counts,
                locations: centroids,
            },
        })
    }
}
