//! Dataset health checking.
//!
//! Verifies the alignment invariants the sampler relies on:
//! - every row-aligned attribute has `n_obs` rows
//! - every per-sample matrix has `n_samples` columns
//! - the conflict matrix, when recorded, is `n_obs × n_obs`
//!
//! It also reports softer issues (non-finite fractions, removed indices that
//! fall outside the current row space) without failing.
//!
//! # Example
//!
//! ```rust
//! use ndarray::array;
//! use subsample::dataset::{validate_dataset, MutationType, RawDataset};
//!
//! let data = RawDataset::from_fractions(
//!     vec!["1".into()],
//!     vec![10],
//!     array![[0.4]],
//!     vec![MutationType::Point],
//! );
//! let report = validate_dataset(&data);
//! assert!(report.is_healthy());
//! ```

use super::RawDataset;
use crate::error::Error;

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Informational, not a problem.
    Info,
    /// Something unusual but not necessarily wrong.
    Warning,
    /// Breaks an alignment invariant; sampling must not proceed.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "INFO"),
            Severity::Warning => write!(f, "WARN"),
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

/// A single issue found while checking a dataset.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Severity of the issue.
    pub severity: Severity,
    /// Human-readable description.
    pub message: String,
    /// Attribute involved.
    pub field: Option<&'static str>,
    /// Expected and found sizes, for shape issues.
    pub shape: Option<(usize, usize)>,
}

impl ValidationIssue {
    /// Create a new validation issue.
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            field: None,
            shape: None,
        }
    }

    /// Name the attribute this issue concerns.
    pub fn with_field(mut self, field: &'static str) -> Self {
        self.field = Some(field);
        self
    }

    /// Record the expected and found sizes.
    pub fn with_shape(mut self, expected: usize, found: usize) -> Self {
        self.shape = Some((expected, found));
        self
    }

    /// Convert to the crate error type.
    pub fn to_error(&self) -> Error {
        match (self.field, self.shape) {
            (Some(what), Some((expected, found))) => Error::DimensionMismatch {
                what,
                expected,
                found,
            },
            _ => Error::Other(self.to_string()),
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.severity, self.message)?;
        if let Some(field) = self.field {
            write!(f, " ({})", field)?;
        }
        if let Some((expected, found)) = self.shape {
            write!(f, " - expected {}, found {}", expected, found)?;
        }
        Ok(())
    }
}

/// Report from a dataset check.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// All issues found.
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self { issues: Vec::new() }
    }

    /// Add an issue to the report.
    pub fn add(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    /// True if nothing at [`Severity::Error`] was found.
    pub fn is_healthy(&self) -> bool {
        self.first_failure().is_none()
    }

    /// First error-level issue, if any.
    pub fn first_failure(&self) -> Option<&ValidationIssue> {
        self.issues.iter().find(|i| i.severity >= Severity::Error)
    }

    /// Number of issues at exactly `severity`.
    pub fn count(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }

    fn rows(&mut self, field: &'static str, expected: usize, found: usize) {
        if expected != found {
            self.add(
                ValidationIssue::new(Severity::Error, "row count differs from mutation_type")
                    .with_field(field)
                    .with_shape(expected, found),
            );
        }
    }

    fn cols(&mut self, field: &'static str, expected: usize, found: usize) {
        if expected != found {
            self.add(
                ValidationIssue::new(Severity::Error, "sample count differs from subclonal_fraction")
                    .with_field(field)
                    .with_shape(expected, found),
            );
        }
    }
}

/// Check the alignment invariants of `data`.
pub fn validate_dataset(data: &RawDataset) -> ValidationReport {
    let mut report = ValidationReport::new();
    let n = data.n_obs();
    let s = data.n_samples();

    report.rows("chromosome", n, data.chromosome.len());
    report.rows("position", n, data.position.len());
    report.rows("non_deleted", n, data.non_deleted.len());

    let matrices: [(&'static str, (usize, usize)); 8] = [
        ("wt_count", data.wt_count.dim()),
        ("mut_count", data.mut_count.dim()),
        ("total_cn", data.total_cn.dim()),
        ("cn_adjustment", data.cn_adjustment.dim()),
        ("kappa", data.kappa.dim()),
        ("mutation_copy_number", data.mutation_copy_number.dim()),
        ("subclonal_fraction", data.subclonal_fraction.dim()),
        ("phase", data.phase.dim()),
    ];
    for (field, (rows, cols)) in matrices {
        report.rows(field, n, rows);
        report.cols(field, s, cols);
    }
    report.cols("cellularity", s, data.cellularity.len());

    if let Some(conflicts) = &data.conflicts {
        let (r, c) = conflicts.0.dim();
        if r != n || c != n {
            report.add(
                ValidationIssue::new(Severity::Error, "conflict matrix is not n_obs × n_obs")
                    .with_field("conflicts")
                    .with_shape(n, r.max(c)),
            );
        }
    }

    let non_finite = data.subclonal_fraction.iter().filter(|v| !v.is_finite()).count();
    if non_finite > 0 {
        report.add(
            ValidationIssue::new(
                Severity::Warning,
                format!("{} non-finite cellular fraction entries", non_finite),
            )
            .with_field("subclonal_fraction"),
        );
    }

    // Removed indices address the pre-sampling row space and are never re-sliced.
    if let Some(&max) = data.removed_indices.iter().max() {
        if max >= n {
            report.add(
                ValidationIssue::new(
                    Severity::Info,
                    format!("removed index {} lies outside the current {} rows", max, n),
                )
                .with_field("removed_indices"),
            );
        }
    }

    report
}
