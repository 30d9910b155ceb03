use thiserror::Error;

/// Result alias for `subsample`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by sampling, unsampling and the reference engine.
///
/// Only contract violations surface here. Situations the sampler treats as
/// no-ops (too few eligible observations, unknown strategy, already sampled)
/// are reported as [`crate::sampling::Notice`] values instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Input was empty.
    #[error("empty input provided")]
    EmptyInput,

    /// A row or column count disagreed with the dataset it belongs to.
    #[error("dimension mismatch in {what}: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Which attribute was checked.
        what: &'static str,
        /// Expected size.
        expected: usize,
        /// Found size.
        found: usize,
    },

    /// A selection strategy was asked for more indices than it may choose from.
    #[error("cannot select {requested} observations from {eligible} eligible")]
    InsufficientEligible {
        /// Requested count.
        requested: usize,
        /// Number of eligible observations.
        eligible: usize,
    },

    /// The similarity mapper was handed nothing to map onto.
    #[error("selection is empty; no observation to map onto")]
    EmptySelection,

    /// Unsampling was requested on a dataset that carries no sampling state.
    #[error("dataset was never sampled: missing {missing}")]
    NotSampled {
        /// The absent sampling fields.
        missing: &'static str,
    },

    /// A cluster label has no row in the cluster summary table.
    #[error("observation {observation} is assigned to cluster {cluster}, which the summary table does not list")]
    UnknownCluster {
        /// The offending label.
        cluster: usize,
        /// Row (in full-dataset space) carrying it.
        observation: usize,
    },

    /// Invalid number of clusters requested.
    #[error("cannot create {requested} clusters from {n_items} items")]
    InvalidClusterCount {
        /// Requested count.
        requested: usize,
        /// Number of items.
        n_items: usize,
    },

    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: &'static str,
    },

    /// Configuration could not be parsed.
    #[error("invalid sampling configuration: {0}")]
    InvalidConfig(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidConfig(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_sampled_names_missing_fields() {
        let err = Error::NotSampled {
            missing: "most_similar, full_data",
        };
        let msg = err.to_string();
        assert!(msg.contains("most_similar"));
        assert!(msg.contains("full_data"));
    }

    #[test]
    fn test_insufficient_eligible_display() {
        let err = Error::InsufficientEligible {
            requested: 5,
            eligible: 0,
        };
        assert_eq!(err.to_string(), "cannot select 5 observations from 0 eligible");
    }
}
