//! Error types for standardization and neutralization.

use karst_math::MathError;
use karst_traits::{EstimatorError, FactorError, TransformError};
use karst_utils::UtilsError;

/// Errors that can occur while standardizing or neutralizing a panel.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Estimator error.
    #[error("estimator error: {0}")]
    Estimator(#[from] EstimatorError),

    /// Math error.
    #[error("math error: {0}")]
    Math(#[from] MathError),

    /// Transform error.
    #[error("transform error: {0}")]
    Transform(#[from] TransformError),

    /// Factor error.
    #[error("factor error: {0}")]
    Factor(#[from] FactorError),

    /// Panel utility error.
    #[error("panel error: {0}")]
    Utils(#[from] UtilsError),

    /// Polars error.
    #[error("data processing error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// No industry column matched the configured source.
    #[error("no industry columns found for {0}")]
    NoIndustryColumns(String),

    /// Industry indicators are not one-hot on some rows.
    #[error("industry indicators are not one-hot on {rows} row(s), first at row {first}")]
    NotOneHot {
        /// Number of offending rows.
        rows: usize,
        /// Index of the first offending row.
        first: usize,
    },

    /// Dimension mismatch.
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),
}
