//! Per-group computation outcomes and coverage accounting.

use std::fmt;

use derive_more::Display;
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Why a cross-section was left uncomputed.
#[derive(Debug, Clone, PartialEq, Display)]
pub enum SkipReason {
    /// Fewer valid rows than the minimum sample size.
    #[display("too few observations: need {required}, got {actual}")]
    TooFewObservations {
        /// Minimum number of valid rows.
        required: usize,
        /// Valid rows available.
        actual: usize,
    },
    /// At least as many regressors as observations.
    #[display("too many columns: {columns} regressors for {rows} rows")]
    TooManyColumns {
        /// Design matrix columns, intercept included.
        columns: usize,
        /// Valid rows.
        rows: usize,
    },
    /// Linearly dependent regressors.
    #[display("rank deficient design: rank {rank} < {columns} columns")]
    RankDeficient {
        /// Numerical rank.
        rank: usize,
        /// Design matrix columns.
        columns: usize,
    },
    /// The solver failed on an otherwise admissible system.
    #[display("numerical failure: {_0}")]
    Numerical(String),
}

/// Result of fitting one cross-section.
#[derive(Debug, Clone)]
pub enum FitOutcome {
    /// Residuals, aligned with the rows that entered the fit.
    Fitted(Array1<f64>),
    /// The cross-section was not fitted.
    Skipped(SkipReason),
}

impl FitOutcome {
    /// Whether the cross-section was fitted.
    #[must_use]
    pub const fn is_fitted(&self) -> bool {
        matches!(self, Self::Fitted(_))
    }

    /// Skip reason, if any.
    #[must_use]
    pub const fn skip_reason(&self) -> Option<&SkipReason> {
        match self {
            Self::Skipped(reason) => Some(reason),
            Self::Fitted(_) => None,
        }
    }
}

/// Share of non-NaN cells in a derived column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Coverage {
    /// Non-NaN cells.
    pub valid: usize,
    /// All cells.
    pub total: usize,
}

impl Coverage {
    /// Count finite values.
    #[must_use]
    pub fn of(values: &[f64]) -> Self {
        Self { valid: values.iter().filter(|v| v.is_finite()).count(), total: values.len() }
    }

    /// Percentage of valid cells, 0 for an empty column.
    #[must_use]
    pub fn percent(&self) -> f64 {
        if self.total == 0 { 0.0 } else { self.valid as f64 / self.total as f64 * 100.0 }
    }
}

impl fmt::Display for Coverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} ({:.1}%)", self.valid, self.total, self.percent())
    }
}
