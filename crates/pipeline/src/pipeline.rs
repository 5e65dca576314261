//! Orchestration of the momentum, standardization and neutralization stages.

use std::collections::HashSet;

use karst_model::{CrossSectionalStandardizer, DailyNeutralizer, NeutralizeInputs};
use karst_primitives::{CrossSections, FactorColumns, IndustrySource, StandardizeMethod};
use karst_styles::{MomentumFactor, SizeFactor};
use karst_traits::{Factor, FactorError, StyleFactor};
use karst_utils::{
    UtilsError, attach_column, check_unique_observations, drop_existing, f64_values, key_values,
    sort_panel, validate_columns,
};
use polars::prelude::*;
use tracing::{info, warn};

use crate::{ColumnReport, PipelineConfig, PipelineError, PipelineReport};

/// Computes the momentum factor and its standardized and neutralized forms.
///
/// A run takes ownership of the panel and returns it sorted by entity and
/// date, with five `Float64` columns appended.
#[derive(Debug, Clone)]
pub struct FactorPipeline {
    config: PipelineConfig,
    columns: FactorColumns,
    momentum: MomentumFactor,
    standardizer: CrossSectionalStandardizer,
    neutralizer: DailyNeutralizer,
}

impl FactorPipeline {
    /// Create a pipeline, validating the configuration.
    ///
    /// # Errors
    /// Returns `PipelineError::InvalidConfig` for a zero look-back, an invalid
    /// MAD multiple, or derived column names that collide with each other or
    /// with input columns.
    pub fn new(config: PipelineConfig) -> Result<Self, PipelineError> {
        if config.momentum.lookback == 0 {
            return Err(PipelineError::InvalidConfig("lookback must be positive".to_string()));
        }
        let standardizer = CrossSectionalStandardizer::new(&config.standardize)
            .map_err(|e| PipelineError::InvalidConfig(e.to_string()))?;

        let columns = config.columns();
        let derived = columns.all();
        let mut seen = HashSet::new();
        if let Some(dup) = derived.iter().find(|c| !seen.insert(c.as_str())) {
            return Err(PipelineError::InvalidConfig(format!("derived column {dup} named twice")));
        }
        let inputs = input_columns(&config);
        if let Some(clash) = derived.iter().find(|c| inputs.contains(*c)) {
            return Err(PipelineError::InvalidConfig(format!(
                "derived column {clash} would replace an input column"
            )));
        }

        Ok(Self {
            momentum: MomentumFactor::with_config(config.momentum.clone()),
            neutralizer: DailyNeutralizer::new(config.neutralize.clone()),
            standardizer,
            columns,
            config,
        })
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Names of the derived columns.
    #[must_use]
    pub const fn columns(&self) -> &FactorColumns {
        &self.columns
    }

    /// Check every required input column upfront, reporting all missing names.
    ///
    /// # Errors
    /// Returns `PipelineError::MissingColumns` if any input column is absent.
    pub fn validate(&self, panel: &DataFrame) -> Result<(), PipelineError> {
        let schema = &self.config.schema;
        let mut required: Vec<String> = self.momentum.required_columns(schema);
        required.push(schema.date.clone());
        required.extend(SizeFactor.required_columns(schema));

        let missing_prefix = match &schema.industry {
            IndustrySource::IndicatorPrefix { prefix } => {
                let names = panel.get_column_names();
                let resolved =
                    schema.industry.resolve_columns(names.iter().map(|n| n.as_str()));
                resolved.is_empty().then(|| format!("{prefix}*"))
            }
            source => {
                required.extend(source.resolve_columns(std::iter::empty()));
                None
            }
        };

        let mut missing = match validate_columns(panel, &required) {
            Ok(()) => Vec::new(),
            Err(UtilsError::MissingColumns(names)) => names,
            Err(other) => return Err(other.into()),
        };
        missing.extend(missing_prefix);
        missing.dedup();

        if missing.is_empty() { Ok(()) } else { Err(PipelineError::MissingColumns(missing)) }
    }

    /// Run every stage over `panel`.
    ///
    /// # Errors
    /// Returns error if required columns are missing, an `(entity, date)`
    /// pair repeats, strict one-hot checking fails, or polars fails. Dates
    /// and entities that cannot be computed only produce NaN.
    pub fn run(&self, panel: DataFrame) -> Result<(DataFrame, PipelineReport), PipelineError> {
        let schema = &self.config.schema;
        self.validate(&panel)?;

        let mut panel = panel;
        let replaced_columns = drop_existing(&mut panel, &self.columns.all())?;
        if !replaced_columns.is_empty() {
            warn!(columns = ?replaced_columns, "replacing stale derived columns");
        }

        let mut panel = sort_panel(panel, &schema.entity, &schema.date)?;
        let entities = key_values(&panel, &schema.entity)?;
        let dates = key_values(&panel, &schema.date)?;
        check_unique_observations(&entities, &dates)?;

        let sections = CrossSections::from_keys(&dates);
        info!(rows = panel.height(), dates = sections.len(), "starting factor pipeline");

        let inputs = NeutralizeInputs::from_panel(&panel, schema)?;
        let one_hot_violations = inputs.labels.violations().len();
        if self.config.strict_one_hot {
            inputs.labels.ensure_one_hot()?;
        } else if one_hot_violations > 0 {
            warn!(
                rows = one_hot_violations,
                "industry indicators not one-hot, rows excluded from neutralization"
            );
        }

        let mut report = PipelineReport {
            rows: panel.height(),
            dates: sections.len(),
            columns: Vec::with_capacity(5),
            replaced_columns,
            one_hot_violations,
        };

        // Momentum
        let raw = self.momentum.compute(&panel, schema)?;
        if raw.len() != panel.height() {
            let err = FactorError::LengthMismatch { expected: panel.height(), actual: raw.len() };
            return Err(err.into());
        }
        report.columns.push(ColumnReport::new(&self.columns.raw, &raw));
        attach_column(&mut panel, &self.columns.raw, raw)?;
        info!(column = %self.columns.raw, coverage = %report.columns[0].coverage, "computed momentum");

        // Standardization
        let created = self.standardizer.apply(&mut panel, &sections, &self.columns)?;
        for name in created {
            let values = f64_values(&panel, &name)?;
            report.columns.push(ColumnReport::new(name, &values));
        }

        // Neutralization
        for method in StandardizeMethod::ALL {
            let source = self.columns.standardized(method);
            let target = self.columns.neutralized(method);
            let result = self.neutralizer.apply(&mut panel, &source, &target, &inputs, &sections)?;
            report.columns.push(
                ColumnReport::new(target, &result.values)
                    .with_fits(result.fitted_dates, result.skipped.len()),
            );
        }

        info!(rows = report.rows, "factor pipeline finished");
        Ok((panel, report))
    }
}

/// Input columns named by the configuration, for collision checks.
fn input_columns(config: &PipelineConfig) -> Vec<String> {
    let schema = &config.schema;
    let mut cols: Vec<String> = schema.core_columns().iter().map(|c| c.to_string()).collect();
    cols.extend(schema.industry.resolve_columns(std::iter::empty()));
    cols
}
