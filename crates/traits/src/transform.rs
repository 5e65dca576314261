//! Data transformation trait definitions.

use ndarray::Array1;

/// Errors that can occur during transformation.
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    /// Invalid parameter.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Cross-sectional data transformation.
///
/// Operates on the values observed on a single date, transforming them across
/// entities. Implementations must not look outside the slice they are given.
pub trait CrossSectionTransform: Send + Sync {
    /// Transform one date's finite values.
    ///
    /// The output has the same length and order as the input. A degenerate
    /// cross-section yields NaN rather than an error.
    ///
    /// # Errors
    /// Returns `TransformError` for invalid parameters.
    fn transform(&self, values: &Array1<f64>) -> Result<Array1<f64>, TransformError>;

    /// Returns the name of this transformation, used as a column suffix.
    fn name(&self) -> &str;
}

/// Time-series data transformation.
///
/// Operates on one entity's observations ordered by date.
pub trait TimeSeriesTransform: Send + Sync {
    /// Transform one entity's ordered series into a series of equal length.
    fn transform(&self, series: &[f64]) -> Vec<f64>;

    /// Returns the name of this transformation.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_error_display() {
        let err = TransformError::InvalidParameter("bad value".to_string());
        assert_eq!(err.to_string(), "invalid parameter: bad value");
    }
}
