//! Guarded ordinary least squares residual estimation.

use karst_math::{matrix_rank, ols_residuals};
use karst_traits::{EstimatorError, ResidualEstimator};
use ndarray::{Array1, Array2};

/// Configuration for the OLS residual estimator.
#[derive(Debug, Clone)]
pub struct OlsConfig {
    /// Minimum number of observations required to fit.
    pub min_observations: usize,
}

impl Default for OlsConfig {
    fn default() -> Self {
        Self { min_observations: 10 }
    }
}

/// OLS estimator returning residuals for one cross-section.
///
/// Before solving, the system must have at least `min_observations` rows,
/// strictly fewer columns than rows, and full column rank.
#[derive(Debug, Clone)]
pub struct OlsResidualEstimator {
    config: OlsConfig,
}

impl OlsResidualEstimator {
    /// Create a new estimator with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(OlsConfig::default())
    }

    /// Get the minimum sample size.
    #[must_use]
    pub const fn min_observations(&self) -> usize {
        self.config.min_observations
    }

    fn check(&self, y: &Array1<f64>, x: &Array2<f64>) -> Result<(), EstimatorError> {
        let n = y.len();
        let p = x.ncols();

        if x.nrows() != n {
            return Err(EstimatorError::DimensionMismatch {
                expected: n,
                actual: x.nrows(),
                context: "design matrix".to_string(),
            });
        }
        if n < self.config.min_observations {
            return Err(EstimatorError::InsufficientData {
                required: self.config.min_observations,
                actual: n,
            });
        }
        if p >= n {
            return Err(EstimatorError::TooManyColumns { columns: p, rows: n });
        }

        let rank = matrix_rank(x);
        if rank < p {
            return Err(EstimatorError::RankDeficient { rank, columns: p });
        }

        Ok(())
    }
}

impl Default for OlsResidualEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl ResidualEstimator for OlsResidualEstimator {
    type Config = OlsConfig;

    fn with_config(config: Self::Config) -> Self {
        Self { config }
    }

    fn fit_residuals(&self, y: &Array1<f64>, x: &Array2<f64>) -> Result<Array1<f64>, EstimatorError> {
        self.check(y, x)?;

        ols_residuals(y, x).map_err(|e| EstimatorError::LinearAlgebra(e.to_string()))
    }
}
