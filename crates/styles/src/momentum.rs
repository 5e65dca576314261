//! Volatility-adjusted momentum factor implementation.

use std::collections::HashSet;

use karst_math::{Ddof, std_dev};
use karst_primitives::{PanelSchema, entity_runs};
use karst_traits::{Factor, FactorError, StyleFactor, TimeSeriesTransform};
use karst_utils::{f64_values, key_values};
use ndarray::ArrayView1;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Configuration for momentum factor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MomentumConfig {
    /// Look-back period in observations.
    pub lookback: usize,
}

impl Default for MomentumConfig {
    fn default() -> Self {
        Self { lookback: 3 }
    }
}

/// Volatility-adjusted momentum style factor.
///
/// For each entity, the value at row `t` is the `N`-period price return
/// divided by the population standard deviation of the `N` prices strictly
/// before `t`:
///
/// ```text
/// (P_t - P_{t-N}) / P_{t-N} / std(P_{t-N}, ..., P_{t-1})
/// ```
///
/// The first `N` rows of every entity are NaN, as is any row whose window has
/// zero volatility.
#[derive(Debug, Clone)]
pub struct MomentumFactor {
    config: MomentumConfig,
}

impl MomentumFactor {
    /// Create a new momentum factor with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MomentumConfig::default())
    }

    /// Create a momentum factor with a given look-back.
    #[must_use]
    pub fn with_lookback(lookback: usize) -> Self {
        Self::with_config(MomentumConfig { lookback })
    }

    fn value_at(&self, prices: &[f64], t: usize) -> f64 {
        let n = self.config.lookback;
        let base = prices[t - n];
        let ret = (prices[t] - base) / base;
        let vol = std_dev(ArrayView1::from(&prices[t - n..t]), Ddof::Population);

        if vol == 0.0 || !vol.is_finite() {
            return f64::NAN;
        }
        let value = ret / vol;
        if value.is_finite() { value } else { f64::NAN }
    }
}

impl Default for MomentumFactor {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSeriesTransform for MomentumFactor {
    fn transform(&self, series: &[f64]) -> Vec<f64> {
        let n = self.config.lookback;
        let mut out = vec![f64::NAN; series.len()];
        if n == 0 || series.len() <= n {
            return out;
        }

        for (t, slot) in out.iter_mut().enumerate().skip(n) {
            *slot = self.value_at(series, t);
        }
        out
    }

    fn name(&self) -> &str {
        "vol_adj_momentum"
    }
}

impl Factor for MomentumFactor {
    fn name(&self) -> &str {
        "momentum"
    }

    fn required_columns(&self, schema: &PanelSchema) -> Vec<String> {
        vec![schema.entity.clone(), schema.close.clone()]
    }

    /// Compute momentum over a panel already grouped by entity and sorted by date.
    fn compute(&self, panel: &DataFrame, schema: &PanelSchema) -> Result<Vec<f64>, FactorError> {
        if self.config.lookback == 0 {
            return Err(FactorError::InvalidConfig("lookback must be at least 1".to_string()));
        }

        let entities = key_values(panel, &schema.entity)
            .map_err(|_| FactorError::MissingColumn(schema.entity.clone()))?;
        let prices = f64_values(panel, &schema.close)
            .map_err(|_| FactorError::MissingColumn(schema.close.clone()))?;

        let mut values = vec![f64::NAN; prices.len()];
        let mut seen = HashSet::new();
        let mut short_groups = 0usize;

        for run in entity_runs(&entities) {
            if let Some(entity) = &entities[run.start]
                && !seen.insert(entity.as_str())
            {
                return Err(FactorError::NonContiguousEntity(entity.clone()));
            }
            if run.len() <= self.config.lookback {
                short_groups += 1;
                continue;
            }
            let group = TimeSeriesTransform::transform(self, &prices[run.clone()]);
            values[run].copy_from_slice(&group);
        }

        debug!(
            groups = seen.len(),
            short_groups,
            lookback = self.config.lookback,
            "computed momentum"
        );

        Ok(values)
    }
}

impl StyleFactor for MomentumFactor {
    type Config = MomentumConfig;

    fn with_config(config: Self::Config) -> Self {
        Self { config }
    }

    fn config(&self) -> &Self::Config {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use rstest::rstest;

    use super::*;

    fn panel(entities: &[&str], prices: &[f64]) -> DataFrame {
        df! {
            "entity_id" => entities,
            "close_price" => prices,
        }
        .unwrap()
    }

    #[test]
    fn momentum_config_defaults() {
        let config = MomentumConfig::default();
        assert_eq!(config.lookback, 3);
    }

    #[test]
    fn momentum_factor_name() {
        let factor = MomentumFactor::new();
        assert_eq!(Factor::name(&factor), "momentum");
    }

    #[test]
    fn momentum_required_columns() {
        let cols = MomentumFactor::new().required_columns(&PanelSchema::default());
        assert!(cols.contains(&"entity_id".to_string()));
        assert!(cols.contains(&"close_price".to_string()));
    }

    #[test]
    fn momentum_matches_hand_computation() {
        let prices = [10.0, 11.0, 12.0, 13.0, 12.0];
        let out = MomentumFactor::new().transform(&prices);

        assert!(out[..3].iter().all(|v| v.is_nan()));
        // t=3: return 0.3, vol of [10, 11, 12] = sqrt(2/3)
        assert_relative_eq!(out[3], 0.3 / (2.0_f64 / 3.0).sqrt(), epsilon = 1e-12);
        // t=4: return 1/11, vol of [11, 12, 13] = sqrt(2/3)
        assert_relative_eq!(out[4], (1.0 / 11.0) / (2.0_f64 / 3.0).sqrt(), epsilon = 1e-12);
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(3)]
    fn short_series_all_nan(#[case] len: usize) {
        let prices: Vec<f64> = (0..len).map(|i| 10.0 + i as f64).collect();
        assert!(MomentumFactor::new().transform(&prices).iter().all(|v| v.is_nan()));
    }

    #[test]
    fn lookback_plus_one_yields_single_value_at_end() {
        let out = MomentumFactor::new().transform(&[10.0, 12.0, 11.0, 13.0]);
        let valid: Vec<usize> = (0..out.len()).filter(|&i| !out[i].is_nan()).collect();
        assert_eq!(valid, vec![3]);
    }

    #[test]
    fn flat_window_is_nan_not_infinite() {
        let out = MomentumFactor::new().transform(&[10.0, 10.0, 10.0, 11.0]);
        assert!(out[3].is_nan());
    }

    #[rstest]
    #[case(&[10.0, 11.0, 10.5, 12.0], 1.0)]
    #[case(&[10.0, 9.0, 9.5, 8.0], -1.0)]
    fn sign_follows_price_change(#[case] prices: &[f64], #[case] sign: f64) {
        let out = MomentumFactor::new().transform(prices);
        assert_eq!(out[3].signum(), sign);
    }

    #[test]
    fn groups_do_not_leak_across_entities() {
        let df = panel(
            &["A", "A", "A", "A", "B", "B", "B"],
            &[10.0, 11.0, 12.0, 13.0, 50.0, 51.0, 49.0],
        );
        let values = MomentumFactor::new().compute(&df, &PanelSchema::default()).unwrap();

        assert_eq!(values.len(), 7);
        assert!(!values[3].is_nan());
        // B has exactly three rows: no history for any of them
        assert!(values[4..].iter().all(|v| v.is_nan()));
    }

    #[test]
    fn split_entity_block_is_rejected() {
        let df = panel(&["A", "A", "B", "A"], &[1.0, 2.0, 3.0, 4.0]);
        let err = MomentumFactor::new().compute(&df, &PanelSchema::default()).unwrap_err();
        assert!(matches!(err, FactorError::NonContiguousEntity(e) if e == "A"));
    }

    #[test]
    fn zero_lookback_is_invalid() {
        let df = panel(&["A"], &[1.0]);
        let factor = MomentumFactor::with_lookback(0);
        assert!(matches!(
            factor.compute(&df, &PanelSchema::default()),
            Err(FactorError::InvalidConfig(_))
        ));
    }
}
