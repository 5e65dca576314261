//! Pipeline configuration.

use karst_model::{NeutralizeConfig, StandardizeConfig};
use karst_primitives::{FactorColumns, IndustrySource, PanelSchema};
use karst_styles::MomentumConfig;
use serde::{Deserialize, Serialize};

/// Configuration for a full pipeline run.
///
/// Every field has a default, so a partial JSON document deserializes into a
/// complete configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Panel column layout.
    pub schema: PanelSchema,
    /// Base name of the standardized and neutralized columns.
    pub factor_name: String,
    /// Name of the raw momentum column.
    pub raw_column: String,
    /// Momentum stage.
    pub momentum: MomentumConfig,
    /// Standardization stage.
    pub standardize: StandardizeConfig,
    /// Neutralization stage.
    pub neutralize: NeutralizeConfig,
    /// Treat industry indicator rows that are not one-hot as a fatal error.
    pub strict_one_hot: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            schema: PanelSchema::default(),
            factor_name: "factor".to_string(),
            raw_column: "factor_raw".to_string(),
            momentum: MomentumConfig::default(),
            standardize: StandardizeConfig::default(),
            neutralize: NeutralizeConfig::default(),
            strict_one_hot: false,
        }
    }
}

impl PipelineConfig {
    /// Set the panel schema.
    #[must_use]
    pub fn with_schema(mut self, schema: PanelSchema) -> Self {
        self.schema = schema;
        self
    }

    /// Set the industry source.
    #[must_use]
    pub fn with_industry(mut self, industry: IndustrySource) -> Self {
        self.schema.industry = industry;
        self
    }

    /// Set the momentum look-back.
    #[must_use]
    pub fn with_lookback(mut self, lookback: usize) -> Self {
        self.momentum.lookback = lookback;
        self
    }

    /// Set the MAD clipping multiple.
    #[must_use]
    pub fn with_mad_multiple(mut self, mad_multiple: f64) -> Self {
        self.standardize.mad_multiple = mad_multiple;
        self
    }

    /// Set the minimum regression sample per date.
    #[must_use]
    pub fn with_min_observations(mut self, min_observations: usize) -> Self {
        self.neutralize.min_observations = min_observations;
        self
    }

    /// Enable or disable parallel neutralization.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.neutralize.parallel = parallel;
        self
    }

    /// Enable or disable the strict one-hot check.
    #[must_use]
    pub fn with_strict_one_hot(mut self, strict: bool) -> Self {
        self.strict_one_hot = strict;
        self
    }

    /// Names of the derived columns.
    #[must_use]
    pub fn columns(&self) -> FactorColumns {
        FactorColumns::new(self.factor_name.clone(), self.raw_column.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.momentum.lookback, 3);
        assert_eq!(config.standardize.mad_multiple, 3.0);
        assert_eq!(config.neutralize.min_observations, 10);
        assert!(!config.strict_one_hot);
        assert_eq!(config.columns(), FactorColumns::default());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let json = r#"{
            "momentum": { "lookback": 20 },
            "schema": { "industry": { "kind": "indicator_prefix", "prefix": "industry_" } }
        }"#;
        let config: PipelineConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.momentum.lookback, 20);
        assert_eq!(config.schema.industry, IndustrySource::prefix("industry_"));
        assert_eq!(config.schema.entity, "entity_id");
        assert_eq!(config.standardize.mad_multiple, 3.0);
        assert!(config.neutralize.restandardize);
    }

    #[test]
    fn builders_override_fields() {
        let config = PipelineConfig::default()
            .with_lookback(5)
            .with_mad_multiple(2.5)
            .with_min_observations(20)
            .with_parallel(false)
            .with_strict_one_hot(true);

        assert_eq!(config.momentum.lookback, 5);
        assert_eq!(config.standardize.mad_multiple, 2.5);
        assert_eq!(config.neutralize.min_observations, 20);
        assert!(!config.neutralize.parallel);
        assert!(config.strict_one_hot);
    }
}
