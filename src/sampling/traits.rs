//! Selection strategy trait.

use rand::RngCore;

use super::Notice;
use crate::dataset::RawDataset;
use crate::error::Result;

/// Indices chosen by a strategy, plus an optional diagnostic.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Selection {
    /// Chosen full-space indices, ascending.
    pub indices: Vec<usize>,
    /// Set when the strategy did not apply as asked.
    pub notice: Option<Notice>,
}

impl Selection {
    /// Selection without diagnostics.
    pub fn new(indices: Vec<usize>) -> Self {
        Self {
            indices,
            notice: None,
        }
    }
}

/// Policy choosing which eligible observations survive sampling.
pub trait SelectionStrategy {
    /// Choose a sorted subset of `eligible`.
    ///
    /// `target` is the requested size; strategies that select by a property
    /// of the data may ignore it.
    fn select(
        &self,
        data: &RawDataset,
        eligible: &[usize],
        target: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Selection>;

    /// Short name used in logs and notices.
    fn name(&self) -> &'static str;
}
