//! Sampling configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Cellular fraction below which a mutation counts as clearly subclonal.
///
/// A modelling assumption, not a structural constant; override it through
/// [`SamplingConfig::with_subclonal_threshold`].
pub const SUBCLONAL_CCF_THRESHOLD: f64 = 0.9;

/// Default guard factor: sampling only proceeds when the eligible set holds
/// at least `floor(min_factor * target_count)` observations.
pub const DEFAULT_MIN_FACTOR: f64 = 1.5;

/// Parameters of one sampling call.
///
/// Deserialises from JSON with every field optional:
///
/// ```rust
/// use subsample::sampling::SamplingConfig;
///
/// let config = SamplingConfig::from_json(r#"{"target_count": 500, "seed": 7}"#).unwrap();
/// assert_eq!(config.target_count, 500);
/// assert_eq!(config.strategy, "uniform");
/// assert!(config.points_only);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Number of eligible observations to keep.
    pub target_count: usize,
    /// Guard factor; see [`DEFAULT_MIN_FACTOR`].
    pub min_factor: f64,
    /// Strategy identifier, parsed by [`super::StrategyKind::from_name`].
    pub strategy: String,
    /// Sample point mutations only, always keeping copy-number pseudo-observations.
    pub points_only: bool,
    /// Drop point mutations entirely and sample copy-number pseudo-observations.
    pub remove_points: bool,
    /// Cutoff used by the subclonal-only strategy.
    pub subclonal_threshold: f64,
    /// Seed for the uniform strategy. `None` draws from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            target_count: 0,
            min_factor: DEFAULT_MIN_FACTOR,
            strategy: "uniform".to_string(),
            points_only: true,
            remove_points: false,
            subclonal_threshold: SUBCLONAL_CCF_THRESHOLD,
            seed: None,
        }
    }
}

impl SamplingConfig {
    /// Configuration keeping `target_count` observations, defaults elsewhere.
    pub fn new(target_count: usize) -> Self {
        Self {
            target_count,
            ..Default::default()
        }
    }

    /// Parse from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the guard factor.
    pub fn with_min_factor(mut self, min_factor: f64) -> Self {
        self.min_factor = min_factor;
        self
    }

    /// Set the strategy identifier.
    pub fn with_strategy(mut self, strategy: impl Into<String>) -> Self {
        self.strategy = strategy.into();
        self
    }

    /// Set the point-only flag.
    pub fn with_points_only(mut self, points_only: bool) -> Self {
        self.points_only = points_only;
        self
    }

    /// Set the remove-points flag.
    pub fn with_remove_points(mut self, remove_points: bool) -> Self {
        self.remove_points = remove_points;
        self
    }

    /// Set the subclonal cutoff.
    pub fn with_subclonal_threshold(mut self, threshold: f64) -> Self {
        self.subclonal_threshold = threshold;
        self
    }

    /// Set random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Minimum eligible-set size for sampling to proceed.
    pub fn required_eligible(&self) -> usize {
        (self.min_factor * self.target_count as f64).floor() as usize
    }

    /// Reject values no sampling call could honour.
    pub fn validate(&self) -> Result<()> {
        if !self.min_factor.is_finite() || self.min_factor < 0.0 {
            return Err(Error::InvalidParameter {
                name: "min_factor",
                message: "must be finite and non-negative",
            });
        }
        if !self.subclonal_threshold.is_finite() {
            return Err(Error::InvalidParameter {
                name: "subclonal_threshold",
                message: "must be finite",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SamplingConfig::default();
        assert_eq!(config.min_factor, 1.5);
        assert_eq!(config.strategy, "uniform");
        assert!(config.points_only);
        assert!(!config.remove_points);
        assert_eq!(config.subclonal_threshold, SUBCLONAL_CCF_THRESHOLD);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_required_eligible_floors() {
        assert_eq!(SamplingConfig::new(10).required_eligible(), 15);
        assert_eq!(SamplingConfig::new(3).required_eligible(), 4);
        assert_eq!(SamplingConfig::new(4).with_min_factor(1.0).required_eligible(), 4);
    }

    #[test]
    fn test_from_json_partial() {
        let config = SamplingConfig::from_json(
            r#"{"target_count": 20, "strategy": "subclonal", "remove_points": true}"#,
        )
        .unwrap();
        assert_eq!(config.target_count, 20);
        assert_eq!(config.strategy, "subclonal");
        assert!(config.remove_points);
        assert_eq!(config.min_factor, 1.5);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = SamplingConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_validate_rejects_negative_factor() {
        let err = SamplingConfig::new(5).with_min_factor(-1.0).validate().unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name: "min_factor", .. }));
    }

    #[test]
    fn test_roundtrip_through_json() {
        let config = SamplingConfig::new(8).with_seed(3).with_strategy("uniform");
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(SamplingConfig::from_json(&json).unwrap(), config);
    }
}
