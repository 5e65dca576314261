//! Factor trait definitions.

use karst_primitives::PanelSchema;
use polars::prelude::*;

/// Errors that can occur during factor computation.
#[derive(Debug, thiserror::Error)]
pub enum FactorError {
    /// Missing required column.
    #[error("missing required column: {0}")]
    MissingColumn(String),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An entity's rows are split into separate blocks.
    #[error("panel not grouped by entity: {0} appears in more than one block")]
    NonContiguousEntity(String),

    /// Output length does not match the panel.
    #[error("length mismatch: expected {expected} rows, got {actual}")]
    LengthMismatch {
        /// Panel rows.
        expected: usize,
        /// Produced values.
        actual: usize,
    },

    /// Polars error.
    #[error("data processing error: {0}")]
    Polars(#[from] PolarsError),
}

/// A factor computed from panel columns, one value per panel row.
pub trait Factor: Send + Sync {
    /// Returns the factor name.
    fn name(&self) -> &str;

    /// Columns this factor reads, resolved against a schema.
    fn required_columns(&self, schema: &PanelSchema) -> Vec<String>;

    /// Compute one value per row of `panel`, in panel row order.
    ///
    /// Rows that cannot be computed are NaN.
    ///
    /// # Errors
    /// Returns `FactorError` if a required column is missing or has the wrong type.
    fn compute(&self, panel: &DataFrame, schema: &PanelSchema) -> Result<Vec<f64>, FactorError>;
}

/// Trait for style factors with a configuration type.
pub trait StyleFactor: Factor {
    /// Configuration type for this factor.
    type Config: Default + Clone + Send + Sync;

    /// Create a factor with the given configuration.
    fn with_config(config: Self::Config) -> Self
    where
        Self: Sized;

    /// Returns the configuration.
    fn config(&self) -> &Self::Config;
}
