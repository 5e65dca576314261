//! Per-row industry labels derived from the panel.

use karst_primitives::IndustrySource;
use karst_utils::{UtilsError, f64_values, key_values};
use polars::prelude::*;

use crate::ModelError;

/// Industry label of every panel row.
///
/// Rows without a usable label are `None` and take no part in neutralization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndustryLabels {
    labels: Vec<Option<String>>,
    violations: Vec<usize>,
}

impl IndustryLabels {
    /// Read labels from the panel according to `source`.
    ///
    /// A categorical source takes the column's string values, treating empty
    /// strings as missing. An indicator source requires exactly one indicator
    /// equal to 1 and all others equal to 0; any other row gets no label and
    /// is recorded as a violation unless every indicator is missing.
    ///
    /// # Errors
    /// Returns error if a configured column is missing, or if a prefix matches
    /// no column at all.
    pub fn from_panel(panel: &DataFrame, source: &IndustrySource) -> Result<Self, ModelError> {
        match source {
            IndustrySource::Categorical { column } => {
                let labels = key_values(panel, column)?
                    .into_iter()
                    .map(|label| label.filter(|l| !l.trim().is_empty()))
                    .collect();
                Ok(Self { labels, violations: Vec::new() })
            }
            _ => {
                let names: Vec<&str> =
                    panel.get_column_names().into_iter().map(|n| n.as_str()).collect();
                let columns = source.resolve_columns(names);
                if columns.is_empty() {
                    return Err(ModelError::NoIndustryColumns(format!("{source:?}")));
                }

                let indicators = columns
                    .iter()
                    .map(|c| {
                        f64_values(panel, c).map(|values| (source.label_for(c).to_string(), values))
                    })
                    .collect::<Result<Vec<_>, UtilsError>>()?;

                Ok(Self::from_indicators(panel.height(), &indicators))
            }
        }
    }

    /// Labels from `(label, indicator values)` pairs over `height` rows.
    #[must_use]
    pub fn from_indicators(height: usize, indicators: &[(String, Vec<f64>)]) -> Self {
        let mut labels = Vec::with_capacity(height);
        let mut violations = Vec::new();

        for row in 0..height {
            let mut hot = None;
            let mut valid = true;
            let mut missing = 0;

            for (idx, (_, values)) in indicators.iter().enumerate() {
                let v = values[row];
                if v.is_nan() {
                    missing += 1;
                    valid = false;
                } else if v == 1.0 && hot.is_none() {
                    hot = Some(idx);
                } else if v != 0.0 {
                    valid = false;
                }
            }

            match hot {
                Some(idx) if valid => labels.push(Some(indicators[idx].0.clone())),
                _ => {
                    if missing < indicators.len() {
                        violations.push(row);
                    }
                    labels.push(None);
                }
            }
        }

        Self { labels, violations }
    }

    /// Build labels directly.
    #[must_use]
    pub fn from_labels(labels: Vec<Option<String>>) -> Self {
        Self { labels, violations: Vec::new() }
    }

    /// Label of every row.
    #[must_use]
    pub fn labels(&self) -> &[Option<String>] {
        &self.labels
    }

    /// Label of one row.
    #[must_use]
    pub fn get(&self, row: usize) -> Option<&str> {
        self.labels.get(row).and_then(Option::as_deref)
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Rows whose indicators were not one-hot.
    #[must_use]
    pub fn violations(&self) -> &[usize] {
        &self.violations
    }

    /// Fail if any row's indicators were not one-hot.
    ///
    /// # Errors
    /// Returns `ModelError::NotOneHot` naming the first offending row.
    pub fn ensure_one_hot(&self) -> Result<(), ModelError> {
        self.violations
            .first()
            .map_or(Ok(()), |&first| Err(ModelError::NotOneHot { rows: self.violations.len(), first }))
    }
}
