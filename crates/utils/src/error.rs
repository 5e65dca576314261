//! Error types for panel utilities.

/// Errors that can occur during panel operations.
#[derive(Debug, thiserror::Error)]
pub enum UtilsError {
    /// Polars error.
    #[error("polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid parameter.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Missing column.
    #[error("missing column: {0}")]
    MissingColumn(String),

    /// One or more required columns are absent.
    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// The same (entity, date) pair occurs more than once.
    #[error("duplicate observation for entity {entity} on {date}")]
    DuplicateObservation {
        /// Entity key.
        entity: String,
        /// Date key.
        date: String,
    },

    /// A derived column would overwrite an existing one.
    #[error("column already exists: {0}")]
    ColumnExists(String),
}
