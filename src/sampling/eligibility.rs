//! Which observations a selection strategy may choose from.

use crate::dataset::{MutationType, RawDataset};

/// Ascending indices of the observations eligible for sampling.
///
/// | `points_only` | `remove_points` | eligible |
/// |---------------|-----------------|----------|
/// | true | false | point mutations |
/// | any | true | copy-number pseudo-observations |
/// | false | false | everything |
pub fn eligible_indices(data: &RawDataset, points_only: bool, remove_points: bool) -> Vec<usize> {
    if remove_points {
        data.indices_of(MutationType::CopyNumber)
    } else if points_only {
        data.indices_of(MutationType::Point)
    } else {
        (0..data.n_obs()).collect()
    }
}
