//! Residual estimation trait definitions.

use karst_primitives::{FitOutcome, SkipReason};
use ndarray::{Array1, Array2};

/// Errors that can occur during estimation.
#[derive(Debug, thiserror::Error)]
pub enum EstimatorError {
    /// Dimension mismatch in input data.
    #[error("dimension mismatch for {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Actual dimension.
        actual: usize,
        /// Context description.
        context: String,
    },

    /// Insufficient data for estimation.
    #[error("insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData {
        /// Required number of observations.
        required: usize,
        /// Actual number of observations.
        actual: usize,
    },

    /// More regressors than the sample supports.
    #[error("too many regressors: {columns} columns for {rows} observations")]
    TooManyColumns {
        /// Design matrix columns.
        columns: usize,
        /// Observations.
        rows: usize,
    },

    /// Rank deficiency in design matrix.
    #[error("rank deficient design matrix: rank {rank} < columns {columns}")]
    RankDeficient {
        /// Actual rank.
        rank: usize,
        /// Number of columns.
        columns: usize,
    },

    /// Linear algebra error.
    #[error("linear algebra error: {0}")]
    LinearAlgebra(String),
}

impl EstimatorError {
    /// Returns whether this error is recoverable.
    ///
    /// Recoverable errors describe a cross-section that cannot be fitted and
    /// is skipped. A dimension mismatch means the caller built a bad system.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InsufficientData { .. }
                | Self::TooManyColumns { .. }
                | Self::RankDeficient { .. }
                | Self::LinearAlgebra(_)
        )
    }
}

impl From<EstimatorError> for SkipReason {
    fn from(err: EstimatorError) -> Self {
        match err {
            EstimatorError::InsufficientData { required, actual } => {
                Self::TooFewObservations { required, actual }
            }
            EstimatorError::TooManyColumns { columns, rows } => Self::TooManyColumns { columns, rows },
            EstimatorError::RankDeficient { rank, columns } => Self::RankDeficient { rank, columns },
            other @ (EstimatorError::DimensionMismatch { .. } | EstimatorError::LinearAlgebra(_)) => {
                Self::Numerical(other.to_string())
            }
        }
    }
}

/// Regression of one cross-section that keeps the residuals.
pub trait ResidualEstimator: Send + Sync {
    /// Configuration type for this estimator.
    type Config: Default + Clone + Send + Sync;

    /// Create a new estimator with the given configuration.
    fn with_config(config: Self::Config) -> Self;

    /// Regress `y` on the design matrix `x` and return the residuals.
    ///
    /// # Arguments
    /// * `y` - Dependent values (n,)
    /// * `x` - Design matrix including any intercept column (n x p)
    ///
    /// # Errors
    /// Returns `EstimatorError` if the system fails a fit guard or cannot be solved.
    fn fit_residuals(&self, y: &Array1<f64>, x: &Array2<f64>) -> Result<Array1<f64>, EstimatorError>;

    /// Fit one cross-section, turning recoverable failures into a skip.
    ///
    /// # Errors
    /// Returns the `EstimatorError` unchanged when it is not recoverable.
    fn fit(&self, y: &Array1<f64>, x: &Array2<f64>) -> Result<FitOutcome, EstimatorError> {
        match self.fit_residuals(y, x) {
            Ok(residuals) => Ok(FitOutcome::Fitted(residuals)),
            Err(err) if err.is_recoverable() => Ok(FitOutcome::Skipped(err.into())),
            Err(err) => Err(err),
        }
    }
}
