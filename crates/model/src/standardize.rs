//! Per-date standardization of a raw factor.

use karst_math::{Ddof, MadClipper, ZScore, average_rank};
use karst_primitives::{CrossSections, FactorColumns, StandardizeMethod};
use karst_traits::{CrossSectionTransform, TransformError};
use karst_utils::{attach_column, f64_values};
use ndarray::Array1;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::ModelError;

/// Configuration for cross-sectional standardization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StandardizeConfig {
    /// Number of MADs kept on each side of the median before z-scoring.
    pub mad_multiple: f64,
}

impl Default for StandardizeConfig {
    fn default() -> Self {
        Self { mad_multiple: 3.0 }
    }
}

/// Median/MAD clipping followed by a population z-score.
#[derive(Debug, Clone)]
pub struct MedianStandardizer {
    clipper: MadClipper,
}

impl MedianStandardizer {
    /// Create a standardizer clipping at `multiple` MADs.
    ///
    /// # Errors
    /// Returns error if `multiple` is not finite and positive.
    pub fn new(multiple: f64) -> Result<Self, ModelError> {
        Ok(Self { clipper: MadClipper::new(multiple)? })
    }
}

impl CrossSectionTransform for MedianStandardizer {
    fn transform(&self, values: &Array1<f64>) -> Result<Array1<f64>, TransformError> {
        let clipped =
            self.clipper.apply(values).map_err(|e| TransformError::InvalidParameter(e.to_string()))?;
        Ok(ZScore::new(Ddof::Population).apply(&clipped))
    }

    fn name(&self) -> &str {
        "median_std"
    }
}

/// Average-tie ranks followed by a sample z-score.
#[derive(Debug, Clone, Copy, Default)]
pub struct RankStandardizer;

impl CrossSectionTransform for RankStandardizer {
    fn transform(&self, values: &Array1<f64>) -> Result<Array1<f64>, TransformError> {
        Ok(ZScore::new(Ddof::Sample).apply(&average_rank(values)))
    }

    fn name(&self) -> &str {
        "rank_std"
    }
}

/// Apply a cross-sectional transform date by date.
///
/// Only finite values enter each date's transform; every other row is NaN.
///
/// # Errors
/// Returns error if the transform rejects its parameters.
pub fn transform_by_date<T: CrossSectionTransform + ?Sized>(
    transform: &T,
    values: &[f64],
    sections: &CrossSections,
) -> Result<Vec<f64>, ModelError> {
    let mut out = vec![f64::NAN; values.len()];

    for (_, rows) in sections.iter() {
        let valid: Vec<usize> = rows.iter().copied().filter(|&r| values[r].is_finite()).collect();
        if valid.is_empty() {
            continue;
        }

        let input = Array1::from_iter(valid.iter().map(|&r| values[r]));
        let result = transform.transform(&input)?;
        for (&row, value) in valid.iter().zip(result) {
            out[row] = value;
        }
    }

    Ok(out)
}

/// Rescales a raw factor per date with the median/MAD and rank methods.
#[derive(Debug, Clone)]
pub struct CrossSectionalStandardizer {
    median: MedianStandardizer,
    rank: RankStandardizer,
}

impl CrossSectionalStandardizer {
    /// Create a standardizer from configuration.
    ///
    /// # Errors
    /// Returns error if the MAD multiple is invalid.
    pub fn new(config: &StandardizeConfig) -> Result<Self, ModelError> {
        Ok(Self { median: MedianStandardizer::new(config.mad_multiple)?, rank: RankStandardizer })
    }

    fn method(&self, method: StandardizeMethod) -> &dyn CrossSectionTransform {
        match method {
            StandardizeMethod::Median => &self.median,
            StandardizeMethod::Rank => &self.rank,
        }
    }

    /// Standardize raw values with one method.
    ///
    /// # Errors
    /// Returns error if the transform fails.
    pub fn standardize(
        &self,
        method: StandardizeMethod,
        raw: &[f64],
        sections: &CrossSections,
    ) -> Result<Vec<f64>, ModelError> {
        transform_by_date(self.method(method), raw, sections)
    }

    /// Append every standardized column of `columns.raw` to the panel.
    ///
    /// Returns the names of the columns created.
    ///
    /// # Errors
    /// Returns error if the raw column is missing or an output column already exists.
    pub fn apply(
        &self,
        panel: &mut DataFrame,
        sections: &CrossSections,
        columns: &FactorColumns,
    ) -> Result<Vec<String>, ModelError> {
        let raw = f64_values(panel, &columns.raw)?;
        let mut created = Vec::with_capacity(StandardizeMethod::ALL.len());

        for method in StandardizeMethod::ALL {
            let name = columns.standardized(method);
            let values = self.standardize(method, &raw, sections)?;
            info!(column = %name, valid = values.iter().filter(|v| v.is_finite()).count(), "standardized");
            attach_column(panel, &name, values)?;
            created.push(name);
        }

        Ok(created)
    }
}

impl Default for CrossSectionalStandardizer {
    fn default() -> Self {
        Self { median: MedianStandardizer { clipper: MadClipper::default() }, rank: RankStandardizer }
    }
}
