//! Factor column naming.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Cross-sectional standardization method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StandardizeMethod {
    /// Median/MAD clipping followed by a z-score.
    #[display("median_std")]
    Median,
    /// Average-tie ranks followed by a z-score.
    #[display("rank_std")]
    Rank,
}

impl StandardizeMethod {
    /// All methods, in output column order.
    pub const ALL: [Self; 2] = [Self::Median, Self::Rank];
}

/// Names of every derived column produced for one factor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorColumns {
    /// Base factor name used to build standardized column names.
    pub name: String,
    /// Raw factor column.
    pub raw: String,
}

impl FactorColumns {
    /// Create a naming scheme.
    #[must_use]
    pub fn new(name: impl Into<String>, raw: impl Into<String>) -> Self {
        Self { name: name.into(), raw: raw.into() }
    }

    /// Standardized column, e.g. `factor.median_std`.
    #[must_use]
    pub fn standardized(&self, method: StandardizeMethod) -> String {
        format!("{}.{method}", self.name)
    }

    /// Neutralized column, e.g. `factor.median_std_neutral`.
    #[must_use]
    pub fn neutralized(&self, method: StandardizeMethod) -> String {
        neutral_name(&self.standardized(method))
    }

    /// Every derived column, in creation order.
    #[must_use]
    pub fn all(&self) -> Vec<String> {
        let mut cols = vec![self.raw.clone()];
        cols.extend(StandardizeMethod::ALL.iter().map(|&m| self.standardized(m)));
        cols.extend(StandardizeMethod::ALL.iter().map(|&m| self.neutralized(m)));
        cols
    }
}

impl Default for FactorColumns {
    fn default() -> Self {
        Self::new("factor", "factor_raw")
    }
}

/// Name of the neutralized counterpart of a standardized column.
#[must_use]
pub fn neutral_name(standardized: &str) -> String {
    format!("{standardized}_neutral")
}
