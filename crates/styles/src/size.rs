//! Size exposure.

use karst_primitives::PanelSchema;
use karst_traits::{Factor, FactorError};
use karst_utils::f64_values;
use polars::prelude::*;

/// Log market capitalization.
///
/// Zero, negative and missing capitalizations have no logarithm and come out
/// as NaN, which excludes the row from any regression using this exposure.
#[derive(Debug, Clone, Copy, Default)]
pub struct SizeFactor;

impl SizeFactor {
    /// Log size of a single capitalization.
    #[must_use]
    pub fn log_size(market_cap: f64) -> f64 {
        if market_cap.is_finite() && market_cap > 0.0 { market_cap.ln() } else { f64::NAN }
    }
}

impl Factor for SizeFactor {
    fn name(&self) -> &str {
        "log_size"
    }

    fn required_columns(&self, schema: &PanelSchema) -> Vec<String> {
        vec![schema.market_cap.clone()]
    }

    fn compute(&self, panel: &DataFrame, schema: &PanelSchema) -> Result<Vec<f64>, FactorError> {
        let caps = f64_values(panel, &schema.market_cap)
            .map_err(|_| FactorError::MissingColumn(schema.market_cap.clone()))?;
        Ok(caps.into_iter().map(Self::log_size).collect())
    }
}
