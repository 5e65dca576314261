//! Daily industry and size neutralization.

use karst_math::{Ddof, ZScore};
use karst_primitives::{Coverage, CrossSections, FitOutcome, PanelSchema, SkipReason};
use karst_styles::SizeFactor;
use karst_traits::{EstimatorError, Factor, ResidualEstimator};
use karst_utils::{attach_column, f64_values};
use ndarray::Array1;
use polars::prelude::*;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{DesignMatrix, IndustryLabels, ModelError, OlsConfig, OlsResidualEstimator};

/// Configuration for daily neutralization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NeutralizeConfig {
    /// Minimum valid rows for a date to be regressed.
    pub min_observations: usize,
    /// Z-score the residual column over the whole panel afterwards.
    pub restandardize: bool,
    /// Fit dates on the rayon thread pool.
    pub parallel: bool,
}

impl Default for NeutralizeConfig {
    fn default() -> Self {
        Self { min_observations: 10, restandardize: true, parallel: true }
    }
}

/// Regressors shared by every neutralized column of a panel.
#[derive(Debug, Clone)]
pub struct NeutralizeInputs {
    /// Industry label of every row.
    pub labels: IndustryLabels,
    /// Natural log of market capitalization, NaN where undefined.
    pub log_size: Vec<f64>,
}

impl NeutralizeInputs {
    /// Read labels and log market cap from the panel.
    ///
    /// # Errors
    /// Returns error if the market cap or industry columns are missing.
    pub fn from_panel(panel: &DataFrame, schema: &PanelSchema) -> Result<Self, ModelError> {
        let labels = IndustryLabels::from_panel(panel, &schema.industry)?;
        let log_size = SizeFactor.compute(panel, schema)?;
        Ok(Self { labels, log_size })
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.log_size.len()
    }

    /// Whether there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.log_size.is_empty()
    }
}

/// Outcome of neutralizing one column.
#[derive(Debug, Clone)]
pub struct Neutralized {
    /// Residual per row, NaN where the row took no part in a fitted regression.
    pub values: Vec<f64>,
    /// Dates whose regression was fitted.
    pub fitted_dates: usize,
    /// Dates skipped, with the reason.
    pub skipped: Vec<(String, SkipReason)>,
}

impl Neutralized {
    /// Non-NaN share of the values.
    #[must_use]
    pub fn coverage(&self) -> Coverage {
        Coverage::of(&self.values)
    }
}

/// Regresses a factor on industry dummies and log size, date by date.
///
/// Residuals replace the factor on rows that entered a fitted regression;
/// every other row is NaN.
#[derive(Debug, Clone)]
pub struct DailyNeutralizer<E: ResidualEstimator = OlsResidualEstimator> {
    config: NeutralizeConfig,
    estimator: E,
}

impl DailyNeutralizer {
    /// Create a neutralizer backed by guarded OLS.
    #[must_use]
    pub fn new(config: NeutralizeConfig) -> Self {
        let estimator =
            OlsResidualEstimator::with_config(OlsConfig { min_observations: config.min_observations });
        Self { config, estimator }
    }
}

impl Default for DailyNeutralizer {
    fn default() -> Self {
        Self::new(NeutralizeConfig::default())
    }
}

impl<E: ResidualEstimator> DailyNeutralizer<E> {
    /// Create a neutralizer with a custom estimator.
    pub const fn with_estimator(config: NeutralizeConfig, estimator: E) -> Self {
        Self { config, estimator }
    }

    /// Get the configuration.
    pub const fn config(&self) -> &NeutralizeConfig {
        &self.config
    }

    /// Fit one date. Returns the rows that entered the regression and the outcome.
    fn fit_date(
        &self,
        rows: &[usize],
        values: &[f64],
        inputs: &NeutralizeInputs,
    ) -> Result<(Vec<usize>, FitOutcome), EstimatorError> {
        let mut categories: Vec<&str> = rows.iter().filter_map(|&r| inputs.labels.get(r)).collect();
        categories.sort_unstable();
        categories.dedup();

        let valid: Vec<usize> = rows
            .iter()
            .copied()
            .filter(|&r| {
                values[r].is_finite()
                    && inputs.labels.get(r).is_some()
                    && inputs.log_size[r].is_finite()
            })
            .collect();

        if valid.len() < self.config.min_observations {
            let reason = SkipReason::TooFewObservations {
                required: self.config.min_observations,
                actual: valid.len(),
            };
            return Ok((valid, FitOutcome::Skipped(reason)));
        }

        let labels: Vec<&str> = valid.iter().filter_map(|&r| inputs.labels.get(r)).collect();
        let sizes: Vec<f64> = valid.iter().map(|&r| inputs.log_size[r]).collect();
        let design = DesignMatrix::build(&categories, &labels, &sizes);
        let y = Array1::from_iter(valid.iter().map(|&r| values[r]));

        let outcome = self.estimator.fit(&y, &design.matrix)?;
        Ok((valid, outcome))
    }

    /// Neutralize a column of values.
    ///
    /// # Errors
    /// Returns error if `values` and `inputs` differ in length, or the
    /// estimator fails in a way that is not a per-date skip.
    pub fn neutralize(
        &self,
        values: &[f64],
        inputs: &NeutralizeInputs,
        sections: &CrossSections,
    ) -> Result<Neutralized, ModelError> {
        if values.len() != inputs.len() || inputs.labels.len() != inputs.len() {
            return Err(ModelError::DimensionMismatch(format!(
                "{} values, {} log sizes, {} labels",
                values.len(),
                inputs.len(),
                inputs.labels.len()
            )));
        }

        let dates: Vec<(&str, &[usize])> = sections.iter().collect();
        let fits: Vec<(&str, Vec<usize>, FitOutcome)> = if self.config.parallel {
            dates
                .par_iter()
                .map(|&(date, rows)| {
                    let (valid, outcome) = self.fit_date(rows, values, inputs)?;
                    Ok((date, valid, outcome))
                })
                .collect::<Result<_, EstimatorError>>()?
        } else {
            dates
                .iter()
                .map(|&(date, rows)| {
                    let (valid, outcome) = self.fit_date(rows, values, inputs)?;
                    Ok((date, valid, outcome))
                })
                .collect::<Result<_, EstimatorError>>()?
        };

        let mut out = vec![f64::NAN; values.len()];
        let mut fitted_dates = 0;
        let mut skipped = Vec::new();

        for (date, valid, outcome) in fits {
            match outcome {
                FitOutcome::Fitted(residuals) => {
                    for (&row, resid) in valid.iter().zip(residuals) {
                        out[row] = resid;
                    }
                    fitted_dates += 1;
                }
                FitOutcome::Skipped(reason) => {
                    debug!(date, rows = valid.len(), %reason, "skipped neutralization");
                    skipped.push((date.to_string(), reason));
                }
            }
        }

        if self.config.restandardize {
            out = restandardize(&out);
        }

        Ok(Neutralized { values: out, fitted_dates, skipped })
    }

    /// Neutralize `source` and append the result as `target`.
    ///
    /// # Errors
    /// Returns error if `source` is missing or `target` already exists.
    pub fn apply(
        &self,
        panel: &mut DataFrame,
        source: &str,
        target: &str,
        inputs: &NeutralizeInputs,
        sections: &CrossSections,
    ) -> Result<Neutralized, ModelError> {
        let values = f64_values(panel, source)?;
        let result = self.neutralize(&values, inputs, sections)?;

        let coverage = result.coverage();
        info!(
            column = target,
            fitted = result.fitted_dates,
            skipped = result.skipped.len(),
            %coverage,
            "neutralized"
        );

        attach_column(panel, target, result.values.clone())?;
        Ok(result)
    }
}

/// Z-score finite values over the whole column with the sample deviation.
fn restandardize(values: &[f64]) -> Vec<f64> {
    let idx: Vec<usize> = (0..values.len()).filter(|&i| values[i].is_finite()).collect();
    let finite = Array1::from_iter(idx.iter().map(|&i| values[i]));
    let scored = ZScore::new(Ddof::Sample).apply(&finite);

    let mut out = vec![f64::NAN; values.len()];
    for (&i, z) in idx.iter().zip(scored) {
        out[i] = z;
    }
    out
}
