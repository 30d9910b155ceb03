//! Built-in selection strategies.
//!
//! - [`Uniform`]: `target` indices without replacement, every eligible index
//!   equally likely.
//! - [`SubclonalOnly`]: single-sample datasets only; keeps eligible indices
//!   whose cellular fraction is below a cutoff.

use rand::seq::index;
use rand::RngCore;

use super::config::SUBCLONAL_CCF_THRESHOLD;
use super::traits::{Selection, SelectionStrategy};
use super::Notice;
use crate::dataset::RawDataset;
use crate::error::{Error, Result};

/// Uniform sampling without replacement.
#[derive(Debug, Clone, Copy, Default)]
pub struct Uniform;

impl SelectionStrategy for Uniform {
    fn select(
        &self,
        _data: &RawDataset,
        eligible: &[usize],
        target: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Selection> {
        if target > eligible.len() {
            return Err(Error::InsufficientEligible {
                requested: target,
                eligible: eligible.len(),
            });
        }

        let mut indices: Vec<usize> = index::sample(rng, eligible.len(), target)
            .into_iter()
            .map(|i| eligible[i])
            .collect();
        indices.sort_unstable();
        Ok(Selection::new(indices))
    }

    fn name(&self) -> &'static str {
        "uniform"
    }
}

/// Keep only clearly subclonal observations.
#[derive(Debug, Clone, Copy)]
pub struct SubclonalOnly {
    threshold: f64,
}

impl SubclonalOnly {
    /// Strategy with the given cellular-fraction cutoff.
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// The cutoff in use.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl Default for SubclonalOnly {
    fn default() -> Self {
        Self::new(SUBCLONAL_CCF_THRESHOLD)
    }
}

impl SelectionStrategy for SubclonalOnly {
    fn select(
        &self,
        data: &RawDataset,
        eligible: &[usize],
        _target: usize,
        _rng: &mut dyn RngCore,
    ) -> Result<Selection> {
        if data.n_samples() != 1 {
            return Ok(Selection {
                indices: eligible.to_vec(),
                notice: Some(Notice::StrategyFallback {
                    strategy: self.name(),
                    reason: format!(
                        "only defined for single-sample data, this dataset has {} samples",
                        data.n_samples()
                    ),
                }),
            });
        }

        let ccf = data.subclonal_fraction.column(0);
        let mut indices: Vec<usize> = eligible
            .iter()
            .copied()
            .filter(|&i| ccf[i] < self.threshold)
            .collect();
        indices.sort_unstable();
        Ok(Selection::new(indices))
    }

    fn name(&self) -> &'static str {
        "subclonal"
    }
}

/// Strategies addressable by name from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    /// [`Uniform`].
    Uniform,
    /// [`SubclonalOnly`].
    SubclonalOnly,
}

impl StrategyKind {
    /// Parse an identifier; `None` if unrecognised.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "uniform" => Some(Self::Uniform),
            "subclonal" | "subclonal_only" => Some(Self::SubclonalOnly),
            _ => None,
        }
    }

    /// Instantiate the strategy. `threshold` only affects [`SubclonalOnly`].
    pub fn build(self, threshold: f64) -> Box<dyn SelectionStrategy> {
        match self {
            Self::Uniform => Box::new(Uniform),
            Self::SubclonalOnly => Box::new(SubclonalOnly::new(threshold)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::dataset::MutationType;
    use ndarray::{array, Array2};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn single_sample(fractions: &[f64]) -> RawDataset {
        let n = fractions.len();
        let ccf = Array2::from_shape_vec((n, 1), fractions.to_vec()).unwrap();
        RawDataset::from_fractions(
            vec!["1".into(); n],
            (0..n as u64).collect(),
            ccf,
            vec![MutationType::Point; n],
        )
    }

    #[test]
    fn test_uniform_sorted_subset() {
        let data = single_sample(&[0.1; 20]);
        let eligible: Vec<usize> = (0..20).step_by(2).collect();
        let mut rng = StdRng::seed_from_u64(42);
        let sel = Uniform.select(&data, &eligible, 4, &mut rng).unwrap();

        assert_eq!(sel.indices.len(), 4);
        assert!(sel.indices.windows(2).all(|w| w[0] < w[1]));
        assert!(sel.indices.iter().all(|i| eligible.contains(i)));
        assert!(sel.notice.is_none());
    }

    #[test]
    fn test_uniform_reproducible_with_seed() {
        let data = single_sample(&[0.5; 50]);
        let eligible: Vec<usize> = (0..50).collect();
        let a = Uniform
            .select(&data, &eligible, 10, &mut StdRng::seed_from_u64(7))
            .unwrap();
        let b = Uniform
            .select(&data, &eligible, 10, &mut StdRng::seed_from_u64(7))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_uniform_full_draw_returns_everything() {
        let data = single_sample(&[0.5; 5]);
        let eligible = vec![0, 1, 2, 3, 4];
        let sel = Uniform
            .select(&data, &eligible, 5, &mut StdRng::seed_from_u64(1))
            .unwrap();
        assert_eq!(sel.indices, eligible);
    }

    #[test]
    fn test_uniform_fails_on_short_eligible_set() {
        let data = single_sample(&[0.5; 3]);
        let err = Uniform
            .select(&data, &[], 2, &mut StdRng::seed_from_u64(1))
            .unwrap_err();
        assert_eq!(
            err,
            Error::InsufficientEligible {
                requested: 2,
                eligible: 0
            }
        );
    }

    #[test]
    fn test_subclonal_threshold() {
        let data = single_sample(&[0.2, 0.95, 0.89, 0.9, 0.4]);
        let sel = SubclonalOnly::default()
            .select(&data, &[0, 1, 2, 3], 0, &mut StdRng::seed_from_u64(0))
            .unwrap();
        // 0.9 itself is not below the cutoff; index 4 is not eligible.
        assert_eq!(sel.indices, vec![0, 2]);
        assert!(sel.notice.is_none());
    }

    #[test]
    fn test_subclonal_multi_sample_falls_back() {
        let data = RawDataset::from_fractions(
            vec!["1".into(); 3],
            vec![1, 2, 3],
            array![[0.1, 0.2], [0.95, 0.99], [0.5, 0.4]],
            vec![MutationType::Point; 3],
        );
        let sel = SubclonalOnly::default()
            .select(&data, &[0, 1, 2], 0, &mut StdRng::seed_from_u64(0))
            .unwrap();
        assert_eq!(sel.indices, vec![0, 1, 2]);
        assert!(matches!(
            sel.notice,
            Some(Notice::StrategyFallback {
                strategy: "subclonal",
                ..
            })
        ));
    }

    #[test]
    fn test_strategy_names() {
        assert_eq!(StrategyKind::from_name("uniform"), Some(StrategyKind::Uniform));
        assert_eq!(
            StrategyKind::from_name("Subclonal_Only"),
            Some(StrategyKind::SubclonalOnly)
        );
        assert_eq!(StrategyKind::from_name("stratified"), None);
        assert_eq!(StrategyKind::Uniform.build(0.9).name(), "uniform");
    }
}
