//! Back-mapping from full rows to the most similar selected row.
//!
//! Distance between observations `i` and `j` is the L1 distance of their
//! cellular fractions across samples:
//!
//! ```text
//! d(i, j) = Σₛ |ccf[i, s] - ccf[j, s]|
//! ```
//!
//! Selected rows map to themselves. Every other row maps to the selected row
//! minimising `d`, ties going to the earliest in selection order. The result
//! holds reduced-space row numbers, never references into the reduced data.
//!
//! Cost is O(N × |selection| × samples). It runs once per sampling call.

use ndarray::ArrayView1;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::debug;

use crate::dataset::RawDataset;
use crate::error::{Error, Result};

/// L1 distance between two cellular-fraction rows.
fn l1_distance(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()).sum()
}

/// For every row of `full`, the position within `selection` of its nearest member.
///
/// `selection` holds full-space indices. Fails on an empty selection or an
/// index outside `full`.
pub fn most_similar_map(full: &RawDataset, selection: &[usize]) -> Result<Vec<usize>> {
    if selection.is_empty() {
        return Err(Error::EmptySelection);
    }
    let n = full.n_obs();
    if let Some(&bad) = selection.iter().find(|&&i| i >= n) {
        return Err(Error::DimensionMismatch {
            what: "selection index",
            expected: n,
            found: bad,
        });
    }

    let mut own_position: Vec<Option<usize>> = vec![None; n];
    for (pos, &i) in selection.iter().enumerate() {
        own_position[i].get_or_insert(pos);
    }

    let ccf = &full.subclonal_fraction;
    let nearest = |i: usize| -> usize {
        if let Some(pos) = own_position[i] {
            return pos;
        }
        let row = ccf.row(i);
        let mut best = 0;
        let mut best_dist = f64::INFINITY;
        for (pos, &j) in selection.iter().enumerate() {
            let dist = l1_distance(row, ccf.row(j));
            // Strict: keeps the first minimum and never lets NaN win.
            if dist < best_dist {
                best_dist = dist;
                best = pos;
            }
        }
        best
    };

    #[cfg(feature = "parallel")]
    let map: Vec<usize> = (0..n).into_par_iter().map(nearest).collect();

    #[cfg(not(feature = "parallel"))]
    let map: Vec<usize> = (0..n).map(nearest).collect();

    debug!(
        n_full = n,
        n_selected = selection.len(),
        "built most-similar back-map"
    );
    Ok(map)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::dataset::MutationType;
    use ndarray::{array, Array2};

    fn ladder() -> RawDataset {
        let ccf = Array2::from_shape_fn((10, 1), |(i, _)| (i + 1) as f64 / 10.0);
        RawDataset::from_fractions(
            vec!["1".into(); 10],
            (1..=10).collect(),
            ccf,
            vec![MutationType::Point; 10],
        )
    }

    #[test]
    fn test_ladder_scenario() {
        // Fractions 0.1..=1.0; keep observations with fractions 0.2, 0.5, 0.7, 0.9.
        let selection = [1, 4, 6, 8];
        let map = most_similar_map(&ladder(), &selection).unwrap();

        assert_eq!(map.len(), 10);
        assert_eq!(map[0], 0); // 0.1 -> 0.2
        assert_eq!(map[4], 1); // self
        assert_eq!(map[9], 3); // 1.0 -> 0.9
        for (pos, &i) in selection.iter().enumerate() {
            assert_eq!(map[i], pos);
        }
    }

    #[test]
    fn test_ties_go_to_first_member() {
        // 0.5 is exactly equidistant from 0.25 and 0.75.
        let data = RawDataset::from_fractions(
            vec!["1".into(); 3],
            vec![1, 2, 3],
            array![[0.25], [0.5], [0.75]],
            vec![MutationType::Point; 3],
        );
        let map = most_similar_map(&data, &[0, 2]).unwrap();
        assert_eq!(map, vec![0, 0, 1]);
    }

    #[test]
    fn test_distance_sums_over_samples() {
        // Row 2 is closer to row 0 in sample 0 but much closer to row 1 overall.
        let data = RawDataset::from_fractions(
            vec!["1".into(); 3],
            vec![1, 2, 3],
            array![[0.5, 0.0], [0.7, 1.0], [0.55, 0.9]],
            vec![MutationType::Point; 3],
        );
        let map = most_similar_map(&data, &[0, 1]).unwrap();
        assert_eq!(map[2], 1);
    }

    #[test]
    fn test_nan_never_wins() {
        let data = RawDataset::from_fractions(
            vec!["1".into(); 3],
            vec![1, 2, 3],
            array![[f64::NAN], [0.8], [0.7]],
            vec![MutationType::Point; 3],
        );
        let map = most_similar_map(&data, &[0, 1]).unwrap();
        assert_eq!(map[2], 1);
    }

    #[test]
    fn test_empty_selection_fails() {
        assert_eq!(
            most_similar_map(&ladder(), &[]).unwrap_err(),
            Error::EmptySelection
        );
    }

    #[test]
    fn test_out_of_range_selection_fails() {
        let err = most_similar_map(&ladder(), &[2, 10]).unwrap_err();
        assert!(matches!(err, Error::DimensionMismatch { found: 10, .. }));
    }
}
