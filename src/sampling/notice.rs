//! Non-fatal sampling diagnostics.

use std::fmt;

/// Something the caller should know about a sampling call that still succeeded.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// The input was already sampled; it was returned unchanged.
    AlreadySampled,
    /// Too few eligible observations for the requested target; returned unchanged.
    InsufficientEligible {
        /// Size of the eligible set.
        eligible: usize,
        /// `floor(min_factor * target_count)`.
        required: usize,
    },
    /// The strategy identifier was not recognised; returned unchanged.
    UnknownStrategy(String),
    /// Nothing was selected, not even a copy-number row; returned unchanged.
    EmptySelection,
    /// The strategy could not apply and selected every eligible observation.
    StrategyFallback {
        /// Strategy that fell back.
        strategy: &'static str,
        /// Why it fell back.
        reason: String,
    },
}

impl Notice {
    /// True if the notice means no sampling took place.
    pub fn is_noop(&self) -> bool {
        !matches!(self, Notice::StrategyFallback { .. })
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::AlreadySampled => write!(f, "dataset already sampled, leaving it unchanged"),
            Notice::InsufficientEligible { eligible, required } => write!(
                f,
                "only {eligible} eligible observations, need at least {required} to sample"
            ),
            Notice::UnknownStrategy(name) => {
                write!(f, "unknown sampling strategy '{name}', not sampling")
            }
            Notice::EmptySelection => {
                write!(f, "selection is empty, no observation to map onto")
            }
            Notice::StrategyFallback { strategy, reason } => {
                write!(f, "{strategy} strategy selected every eligible observation: {reason}")
            }
        }
    }
}
