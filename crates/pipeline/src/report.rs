//! Coverage summary of a pipeline run.

use std::fmt;

use karst_primitives::Coverage;
use serde::{Deserialize, Serialize};

/// Coverage of one derived column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnReport {
    /// Column name.
    pub name: String,
    /// Non-NaN share of the column.
    pub coverage: Coverage,
    /// Dates regressed, for neutralized columns.
    pub fitted_dates: Option<usize>,
    /// Dates skipped by the regression guards, for neutralized columns.
    pub skipped_dates: Option<usize>,
}

impl ColumnReport {
    /// Report for a column with no per-date regression.
    #[must_use]
    pub fn new(name: impl Into<String>, values: &[f64]) -> Self {
        Self { name: name.into(), coverage: Coverage::of(values), fitted_dates: None, skipped_dates: None }
    }

    /// Attach regression counts.
    #[must_use]
    pub fn with_fits(mut self, fitted: usize, skipped: usize) -> Self {
        self.fitted_dates = Some(fitted);
        self.skipped_dates = Some(skipped);
        self
    }
}

/// Summary of a pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineReport {
    /// Panel rows.
    pub rows: usize,
    /// Distinct dates.
    pub dates: usize,
    /// Derived columns, in creation order.
    pub columns: Vec<ColumnReport>,
    /// Stale derived columns removed before the run.
    pub replaced_columns: Vec<String>,
    /// Rows whose industry indicators were not one-hot.
    pub one_hot_violations: usize,
}

impl PipelineReport {
    /// Report entry for a column.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&ColumnReport> {
        self.columns.iter().find(|c| c.name == name)
    }
}

impl fmt::Display for PipelineReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "rows: {}, dates: {}", self.rows, self.dates)?;
        if !self.replaced_columns.is_empty() {
            writeln!(f, "replaced columns: {}", self.replaced_columns.join(", "))?;
        }
        if self.one_hot_violations > 0 {
            writeln!(f, "rows without a one-hot industry: {}", self.one_hot_violations)?;
        }

        let width = self.columns.iter().map(|c| c.name.len()).max().unwrap_or(0);
        for column in &self.columns {
            write!(f, "  {:<width$}  {}", column.name, column.coverage)?;
            if let (Some(fitted), Some(skipped)) = (column.fitted_dates, column.skipped_dates) {
                write!(f, "  fitted {fitted} dates, skipped {skipped}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_lists_columns() {
        let report = PipelineReport {
            rows: 4,
            dates: 2,
            columns: vec![
                ColumnReport::new("factor_raw", &[1.0, f64::NAN, 2.0, 3.0]),
                ColumnReport::new("factor.median_std_neutral", &[f64::NAN; 4]).with_fits(0, 2),
            ],
            replaced_columns: Vec::new(),
            one_hot_violations: 0,
        };

        let text = report.to_string();
        assert!(text.starts_with("rows: 4, dates: 2"));
        assert!(text.contains("factor_raw"));
        assert!(text.contains("fitted 0 dates, skipped 2"));
        assert!(!text.contains("replaced"));
    }

    #[test]
    fn column_lookup() {
        let report = PipelineReport {
            columns: vec![ColumnReport::new("factor_raw", &[1.0, 2.0])],
            ..Default::default()
        };
        assert_eq!(report.column("factor_raw").unwrap().coverage, Coverage { valid: 2, total: 2 });
        assert!(report.column("missing").is_none());
    }
}
