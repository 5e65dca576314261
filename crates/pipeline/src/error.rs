//! Error types for the factor pipeline.

use karst_model::ModelError;
use karst_traits::FactorError;
use karst_utils::UtilsError;

/// Errors that abort a pipeline run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Required columns are absent from the panel.
    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Panel utility error.
    #[error("panel error: {0}")]
    Utils(#[from] UtilsError),

    /// Factor computation error.
    #[error("factor error: {0}")]
    Factor(#[from] FactorError),

    /// Standardization or neutralization error.
    #[error("model error: {0}")]
    Model(#[from] ModelError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_columns_display() {
        let err = PipelineError::MissingColumns(vec!["date".to_string(), "market_cap".to_string()]);
        assert_eq!(err.to_string(), "missing required columns: date, market_cap");
    }

    #[test]
    fn wraps_factor_error() {
        let err: PipelineError = FactorError::InvalidConfig("lookback must be positive".into()).into();
        assert!(err.to_string().contains("lookback must be positive"));
    }
}
