//! In-memory mutation datasets.
//!
//! A dataset holds N observations (point mutations, indels and copy-number
//! pseudo-observations) across one or more tumour samples. Per-sample
//! attributes are `Array2` with rows = observations and columns = samples;
//! per-observation attributes are plain `Vec`s. Every row-aligned attribute
//! has exactly [`RawDataset::n_obs`] rows.
//!
//! ## Raw vs Sampled
//!
//! [`Dataset`] is a tagged variant. A [`RawDataset`] has never been sampled.
//! A [`SampledDataset`] owns the reduced rows, the full snapshot they were cut
//! from, and the back-map linking every full row to a reduced row. Because
//! unsampling takes a `&SampledDataset`, calling it on raw data does not
//! type-check; [`Dataset::as_sampled`] is the checked escape hatch for code
//! that only holds the enum.
//!
//! ## Index spaces
//!
//! | Space | Length | Addressed by |
//! |-------|--------|--------------|
//! | full | `full_data().n_obs()` | `most_similar()` keys, `selection()` values |
//! | eligible | varies | strategy input |
//! | reduced | `selection().len()` | `most_similar()` values, clustering rows |

pub mod validate;

use ndarray::{Array2, Axis};

use crate::error::{Error, Result};

pub use validate::{validate_dataset, Severity, ValidationIssue, ValidationReport};

/// Kind of observation a row describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MutationType {
    /// Single nucleotide variant.
    Point,
    /// Pseudo-observation derived from a subclonal copy-number segment.
    CopyNumber,
    /// Insertion/deletion. Eligible only when no type filter is active.
    Indel,
}

/// Phasing of a mutation relative to a copy-number change, per sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// No phasing information.
    #[default]
    Unphased,
    /// Mutation sits on the deleted/lost allele.
    MutationOnDeleted,
    /// Mutation sits on the retained allele.
    MutationOnRetained,
}

/// Pairwise incompatibility between observations.
///
/// `None` in [`RawDataset::conflicts`] means no matrix was recorded, which is
/// different from a recorded matrix with no conflicting pairs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConflictMatrix(pub Array2<bool>);

impl ConflictMatrix {
    /// Build from an N×N boolean matrix.
    pub fn new(pairs: Array2<bool>) -> Self {
        Self(pairs)
    }

    /// Side length (number of observations covered).
    pub fn len(&self) -> usize {
        self.0.nrows()
    }

    /// True if the matrix covers no observations.
    pub fn is_empty(&self) -> bool {
        self.0.nrows() == 0
    }

    /// Whether observations `i` and `j` were recorded as incompatible.
    pub fn conflicts(&self, i: usize, j: usize) -> bool {
        self.0.get((i, j)).copied().unwrap_or(false)
    }

    /// Sub-select both axes at `rows`: the result is `self[rows, rows]`.
    pub fn select(&self, rows: &[usize]) -> Self {
        Self(self.0.select(Axis(0), rows).select(Axis(1), rows))
    }
}

/// One copy-number segment from the side table. Not row-aligned with mutations.
#[derive(Debug, Clone, PartialEq)]
pub struct CnaSegment {
    /// Chromosome name.
    pub chromosome: String,
    /// First base covered.
    pub start: u64,
    /// Last base covered.
    pub end: u64,
    /// Total copy number of the segment.
    pub total_cn: f64,
    /// Fraction of tumour cells carrying the segment state.
    pub cellular_fraction: f64,
}

/// A mutation dataset that has never been sampled.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawDataset {
    /// Chromosome of each observation.
    pub chromosome: Vec<String>,
    /// Position of each observation.
    pub position: Vec<u64>,
    /// Reference-supporting reads (obs × samples).
    pub wt_count: Array2<u32>,
    /// Variant-supporting reads (obs × samples).
    pub mut_count: Array2<u32>,
    /// Total copy number at each observation (obs × samples).
    pub total_cn: Array2<f64>,
    /// Copy-number adjustment factor (obs × samples).
    pub cn_adjustment: Array2<f64>,
    /// Whether the observation lies outside a homozygous deletion.
    pub non_deleted: Vec<bool>,
    /// Scaling constant linking allele frequency to copy number (obs × samples).
    pub kappa: Array2<f64>,
    /// Estimated mutation copy number (obs × samples).
    pub mutation_copy_number: Array2<f64>,
    /// Estimated cellular fraction (obs × samples).
    pub subclonal_fraction: Array2<f64>,
    /// Kind of each observation.
    pub mutation_type: Vec<MutationType>,
    /// Phasing per observation and sample.
    pub phase: Array2<Phase>,
    /// Indices removed upstream. Not re-indexed by sampling.
    pub removed_indices: Vec<usize>,
    /// Chromosome records before upstream filtering.
    pub chromosome_not_filtered: Vec<String>,
    /// Position records before upstream filtering.
    pub position_not_filtered: Vec<u64>,
    /// Optional N×N conflict matrix.
    pub conflicts: Option<ConflictMatrix>,
    /// Tumour purity per sample.
    pub cellularity: Vec<f64>,
    /// Side copy-number table, external to the mutation matrices.
    pub cna_segments: Option<Vec<CnaSegment>>,
}

impl RawDataset {
    /// Minimal dataset carrying only identity, fractions and types.
    ///
    /// The remaining matrices get diploid, fully-pure placeholders:
    /// zero read counts, total copy number 2, adjustment and kappa 1,
    /// mutation copy number equal to the fraction, every row non-deleted.
    pub fn from_fractions(
        chromosome: Vec<String>,
        position: Vec<u64>,
        subclonal_fraction: Array2<f64>,
        mutation_type: Vec<MutationType>,
    ) -> Self {
        let shape = subclonal_fraction.dim();
        let n = shape.0;
        Self {
            chromosome_not_filtered: chromosome.clone(),
            position_not_filtered: position.clone(),
            chromosome,
            position,
            wt_count: Array2::zeros(shape),
            mut_count: Array2::zeros(shape),
            total_cn: Array2::from_elem(shape, 2.0),
            cn_adjustment: Array2::ones(shape),
            non_deleted: vec![true; n],
            kappa: Array2::ones(shape),
            mutation_copy_number: subclonal_fraction.clone(),
            subclonal_fraction,
            mutation_type,
            phase: Array2::from_elem(shape, Phase::Unphased),
            removed_indices: Vec::new(),
            conflicts: None,
            cellularity: vec![1.0; shape.1],
            cna_segments: None,
        }
    }

    /// Number of observations (rows).
    pub fn n_obs(&self) -> usize {
        self.mutation_type.len()
    }

    /// Number of tumour samples (columns of every per-sample matrix).
    pub fn n_samples(&self) -> usize {
        self.subclonal_fraction.ncols()
    }

    /// Ascending indices of every observation of kind `kind`.
    pub fn indices_of(&self, kind: MutationType) -> Vec<usize> {
        self.mutation_type
            .iter()
            .enumerate()
            .filter(|(_, t)| **t == kind)
            .map(|(i, _)| i)
            .collect()
    }

    /// Row-select every row-aligned attribute at `rows`, in the given order.
    ///
    /// The conflict matrix is cut on both axes. `removed_indices`, the
    /// not-filtered records, `cellularity` and the side table are carried
    /// verbatim: they are not addressed by the row space.
    pub fn select_rows(&self, rows: &[usize]) -> Self {
        fn pick<T: Clone>(v: &[T], rows: &[usize]) -> Vec<T> {
            rows.iter().map(|&i| v[i].clone()).collect()
        }

        Self {
            chromosome: pick(&self.chromosome, rows),
            position: pick(&self.position, rows),
            wt_count: self.wt_count.select(Axis(0), rows),
            mut_count: self.mut_count.select(Axis(0), rows),
            total_cn: self.total_cn.select(Axis(0), rows),
            cn_adjustment: self.cn_adjustment.select(Axis(0), rows),
            non_deleted: pick(&self.non_deleted, rows),
            kappa: self.kappa.select(Axis(0), rows),
            mutation_copy_number: self.mutation_copy_number.select(Axis(0), rows),
            subclonal_fraction: self.subclonal_fraction.select(Axis(0), rows),
            mutation_type: pick(&self.mutation_type, rows),
            phase: self.phase.select(Axis(0), rows),
            removed_indices: self.removed_indices.clone(),
            chromosome_not_filtered: self.chromosome_not_filtered.clone(),
            position_not_filtered: self.position_not_filtered.clone(),
            conflicts: self.conflicts.as_ref().map(|c| c.select(rows)),
            cellularity: self.cellularity.clone(),
            cna_segments: self.cna_segments.clone(),
        }
    }

    /// Run [`validate_dataset`] and fail on the first error-level issue.
    pub fn check(&self) -> Result<()> {
        let report = validate_dataset(self);
        match report.first_failure() {
            Some(issue) => Err(issue.to_error()),
            None => Ok(()),
        }
    }
}

/// A dataset reduced by the sampler, together with what is needed to undo it.
///
/// Only [`crate::sampling::Sampler`] constructs this, so `most_similar` always
/// has one entry per `full_data` row and points inside `reduced`.
#[derive(Debug, Clone, PartialEq)]
pub struct SampledDataset {
    reduced: RawDataset,
    selection: Vec<usize>,
    full_data: RawDataset,
    most_similar: Vec<usize>,
}

impl SampledDataset {
    pub(crate) fn new(
        reduced: RawDataset,
        selection: Vec<usize>,
        full_data: RawDataset,
        most_similar: Vec<usize>,
    ) -> Self {
        debug_assert_eq!(reduced.n_obs(), selection.len());
        debug_assert_eq!(full_data.n_obs(), most_similar.len());
        Self {
            reduced,
            selection,
            full_data,
            most_similar,
        }
    }

    /// The reduced rows the clustering engine should see.
    pub fn reduced(&self) -> &RawDataset {
        &self.reduced
    }

    /// Full-space index of each reduced row, ascending.
    pub fn selection(&self) -> &[usize] {
        &self.selection
    }

    /// Snapshot of the dataset before sampling, without the side table.
    pub fn full_data(&self) -> &RawDataset {
        &self.full_data
    }

    /// Back-map: for each full row, the reduced row most similar to it.
    pub fn most_similar(&self) -> &[usize] {
        &self.most_similar
    }

    /// Number of rows in the full snapshot.
    pub fn n_full(&self) -> usize {
        self.full_data.n_obs()
    }
}

/// Either a raw or a sampled dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum Dataset {
    /// Never sampled.
    Raw(RawDataset),
    /// Sampled exactly once.
    Sampled(SampledDataset),
}

impl Dataset {
    /// Whether the dataset carries sampling state.
    pub fn is_sampled(&self) -> bool {
        matches!(self, Dataset::Sampled(_))
    }

    /// The raw dataset, if never sampled.
    pub fn as_raw(&self) -> Option<&RawDataset> {
        match self {
            Dataset::Raw(raw) => Some(raw),
            Dataset::Sampled(_) => None,
        }
    }

    /// The sampled dataset, or [`Error::NotSampled`] naming the missing fields.
    pub fn as_sampled(&self) -> Result<&SampledDataset> {
        match self {
            Dataset::Sampled(sampled) => Ok(sampled),
            Dataset::Raw(_) => Err(Error::NotSampled {
                missing: "most_similar (back-map) and full_data (snapshot)",
            }),
        }
    }

    /// The rows a clustering engine works on.
    pub fn observations(&self) -> &RawDataset {
        match self {
            Dataset::Raw(raw) => raw,
            Dataset::Sampled(sampled) => sampled.reduced(),
        }
    }
}

impl From<RawDataset> for Dataset {
    fn from(raw: RawDataset) -> Self {
        Dataset::Raw(raw)
    }
}

impl From<SampledDataset> for Dataset {
    fn from(sampled: SampledDataset) -> Self {
        Dataset::Sampled(sampled)
    }
}
