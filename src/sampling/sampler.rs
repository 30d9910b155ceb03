//! Sampling orchestrator.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::{info, instrument, warn};

use super::config::SamplingConfig;
use super::eligibility::eligible_indices;
use super::similarity::most_similar_map;
use super::strategy::StrategyKind;
use super::traits::SelectionStrategy;
use super::Notice;
use crate::dataset::{Dataset, MutationType, RawDataset, SampledDataset};
use crate::error::{Error, Result};

/// Result of a sampling call.
#[derive(Debug, Clone)]
pub struct SampleOutcome {
    /// Sampled dataset, or the input unchanged when sampling was skipped.
    pub dataset: Dataset,
    /// Diagnostics raised along the way.
    pub notices: Vec<Notice>,
}

impl SampleOutcome {
    fn unchanged(dataset: &Dataset, notice: Notice) -> Self {
        warn!(%notice, "sampling skipped");
        Self {
            dataset: dataset.clone(),
            notices: vec![notice],
        }
    }

    /// Whether this call produced a new sampled dataset.
    pub fn sampled(&self) -> bool {
        self.dataset.is_sampled() && !self.notices.iter().any(Notice::is_noop)
    }

    /// Drop the diagnostics.
    pub fn into_dataset(self) -> Dataset {
        self.dataset
    }
}

/// Outcome of the early exits.
enum Gate<'a> {
    Open(&'a RawDataset, Vec<usize>),
    Skip(Notice),
}

/// Reduces a dataset to a bounded subset and records how to undo it.
#[derive(Debug, Clone, Default)]
pub struct Sampler {
    config: SamplingConfig,
}

impl Sampler {
    /// Create a sampler.
    pub fn new(config: SamplingConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &SamplingConfig {
        &self.config
    }

    /// Sample with the strategy named in the configuration.
    ///
    /// Returns the input unchanged, with a notice, when it is already sampled,
    /// when the eligible set is smaller than `floor(min_factor * target_count)`,
    /// when the strategy name is unknown, or when nothing ends up selected.
    #[instrument(skip_all, fields(target = self.config.target_count, strategy = %self.config.strategy))]
    pub fn sample(&self, dataset: &Dataset) -> Result<SampleOutcome> {
        let (raw, eligible) = match self.gate(dataset)? {
            Gate::Open(raw, eligible) => (raw, eligible),
            Gate::Skip(notice) => return Ok(SampleOutcome::unchanged(dataset, notice)),
        };
        let Some(kind) = StrategyKind::from_name(&self.config.strategy) else {
            let notice = Notice::UnknownStrategy(self.config.strategy.clone());
            return Ok(SampleOutcome::unchanged(dataset, notice));
        };
        let strategy = kind.build(self.config.subclonal_threshold);
        self.sample_raw(dataset, raw, &eligible, strategy.as_ref())
    }

    /// Sample with a caller-supplied strategy; the configured name is ignored.
    ///
    /// Every index the strategy returns must belong to the eligible set.
    #[instrument(skip_all, fields(target = self.config.target_count, strategy = strategy.name()))]
    pub fn sample_with(
        &self,
        dataset: &Dataset,
        strategy: &dyn SelectionStrategy,
    ) -> Result<SampleOutcome> {
        match self.gate(dataset)? {
            Gate::Open(raw, eligible) => self.sample_raw(dataset, raw, &eligible, strategy),
            Gate::Skip(notice) => Ok(SampleOutcome::unchanged(dataset, notice)),
        }
    }

    /// Early exits shared by every strategy.
    ///
    /// A sampled input is let through before the configuration is validated.
    fn gate<'a>(&self, dataset: &'a Dataset) -> Result<Gate<'a>> {
        let raw = match dataset {
            Dataset::Sampled(_) => return Ok(Gate::Skip(Notice::AlreadySampled)),
            Dataset::Raw(raw) => raw,
        };
        self.config.validate()?;
        let eligible = eligible_indices(raw, self.config.points_only, self.config.remove_points);
        let required = self.config.required_eligible();
        if eligible.len() < required {
            return Ok(Gate::Skip(Notice::InsufficientEligible {
                eligible: eligible.len(),
                required,
            }));
        }
        Ok(Gate::Open(raw, eligible))
    }

    fn sample_raw(
        &self,
        dataset: &Dataset,
        raw: &RawDataset,
        eligible: &[usize],
        strategy: &dyn SelectionStrategy,
    ) -> Result<SampleOutcome> {
        raw.check()?;

        // Recovery point. The side table stays with the reduced rows and is
        // re-attached on unsampling.
        let mut full_data = raw.clone();
        full_data.cna_segments = None;

        let mut rng: Box<dyn RngCore> = match self.config.seed {
            Some(s) => Box::new(StdRng::seed_from_u64(s)),
            None => Box::new(rand::rng()),
        };
        let picked = strategy.select(raw, eligible, self.config.target_count, rng.as_mut())?;

        // `eligible` is ascending, and anything out of range is not in it.
        if picked.indices.iter().any(|i| eligible.binary_search(i).is_err()) {
            return Err(Error::InvalidParameter {
                name: "selection",
                message: "strategy returned an index outside the eligible set",
            });
        }

        let mut notices = Vec::new();
        if let Some(notice) = picked.notice {
            warn!(%notice, "selection strategy fell back");
            notices.push(notice);
        }

        let mut selection = picked.indices;
        if self.config.points_only && !self.config.remove_points {
            // Copy-number pseudo-observations are never sampled away.
            selection.extend(raw.indices_of(MutationType::CopyNumber));
        }
        selection.sort_unstable();
        selection.dedup();

        if selection.is_empty() {
            let skipped = SampleOutcome::unchanged(dataset, Notice::EmptySelection);
            notices.extend(skipped.notices);
            return Ok(SampleOutcome {
                dataset: skipped.dataset,
                notices,
            });
        }

        let reduced = raw.select_rows(&selection);
        let most_similar = most_similar_map(&full_data, &selection)?;

        info!(
            n_full = raw.n_obs(),
            n_eligible = eligible.len(),
            n_selected = selection.len(),
            "sampled dataset"
        );

        Ok(SampleOutcome {
            dataset: Dataset::Sampled(SampledDataset::new(
                reduced,
                selection,
                full_data,
                most_similar,
            )),
            notices,
        })
    }
}

/// Sample `dataset` according to `config`.
pub fn sample(dataset: &Dataset, config: &SamplingConfig) -> Result<SampleOutcome> {
    Sampler::new(config.clone()).sample(dataset)
}
