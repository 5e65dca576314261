//! Panel schema: which columns hold which observation fields.

use serde::{Deserialize, Serialize};

/// How industry membership is supplied on the panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IndustrySource {
    /// A single categorical label column.
    Categorical {
        /// Label column name.
        column: String,
    },
    /// An explicit family of 0/1 indicator columns, one per industry.
    Indicators {
        /// Indicator column names.
        columns: Vec<String>,
    },
    /// All columns whose name starts with `prefix` are 0/1 indicators.
    ///
    /// The industry label is the column name with the prefix stripped.
    IndicatorPrefix {
        /// Shared column-name prefix.
        prefix: String,
    },
}

impl IndustrySource {
    /// Categorical label column.
    #[must_use]
    pub fn categorical(column: impl Into<String>) -> Self {
        Self::Categorical { column: column.into() }
    }

    /// Explicit indicator columns.
    #[must_use]
    pub fn indicators<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Indicators { columns: columns.into_iter().map(Into::into).collect() }
    }

    /// Indicator columns selected by name prefix.
    #[must_use]
    pub fn prefix(prefix: impl Into<String>) -> Self {
        Self::IndicatorPrefix { prefix: prefix.into() }
    }

    /// Resolve the concrete column names against the columns present on a panel.
    ///
    /// For `Categorical` and `Indicators` the configured names are returned as-is
    /// (presence is checked by the caller). For `IndicatorPrefix` only matching
    /// columns that exist are returned, in panel order.
    #[must_use]
    pub fn resolve_columns<'a, I>(&self, available: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        match self {
            Self::Categorical { column } => vec![column.clone()],
            Self::Indicators { columns } => columns.clone(),
            Self::IndicatorPrefix { prefix } => available
                .into_iter()
                .filter(|name| name.starts_with(prefix.as_str()) && name.len() > prefix.len())
                .map(str::to_string)
                .collect(),
        }
    }

    /// Industry label carried by an indicator column.
    #[must_use]
    pub fn label_for<'a>(&self, column: &'a str) -> &'a str {
        match self {
            Self::IndicatorPrefix { prefix } => column.strip_prefix(prefix.as_str()).unwrap_or(column),
            _ => column,
        }
    }
}

impl Default for IndustrySource {
    fn default() -> Self {
        Self::categorical("industry")
    }
}

/// Column layout of an input panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelSchema {
    /// Instrument identifier column.
    pub entity: String,
    /// Observation date column.
    pub date: String,
    /// Close price column.
    pub close: String,
    /// Market capitalization column.
    pub market_cap: String,
    /// Industry membership.
    pub industry: IndustrySource,
}

impl PanelSchema {
    /// Columns required regardless of the industry source.
    #[must_use]
    pub fn core_columns(&self) -> [&str; 4] {
        [self.entity.as_str(), self.date.as_str(), self.close.as_str(), self.market_cap.as_str()]
    }
}

impl Default for PanelSchema {
    fn default() -> Self {
        Self {
            entity: "entity_id".to_string(),
            date: "date".to_string(),
            close: "close_price".to_string(),
            market_cap: "market_cap".to_string(),
            industry: IndustrySource::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_defaults() {
        let schema = PanelSchema::default();
        assert_eq!(schema.core_columns(), ["entity_id", "date", "close_price", "market_cap"]);
        assert_eq!(schema.industry, IndustrySource::categorical("industry"));
    }

    #[test]
    fn prefix_resolves_matching_columns_only() {
        let source = IndustrySource::prefix("industry_");
        let cols = source.resolve_columns(["date", "industry_Banks", "industry_", "industry_Media"]);
        assert_eq!(cols, vec!["industry_Banks".to_string(), "industry_Media".to_string()]);
        assert_eq!(source.label_for("industry_Banks"), "Banks");
    }

    #[test]
    fn explicit_indicators_keep_names() {
        let source = IndustrySource::indicators(["tech", "energy"]);
        assert_eq!(source.label_for("tech"), "tech");
        assert_eq!(source.resolve_columns([]), vec!["tech".to_string(), "energy".to_string()]);
    }

    #[test]
    fn schema_deserializes_with_defaults() {
        let schema: PanelSchema = serde_json::from_str(
            r#"{"entity": "code", "industry": {"kind": "indicator_prefix", "prefix": "ind_"}}"#,
        )
        .unwrap();
        assert_eq!(schema.entity, "code");
        assert_eq!(schema.date, "date");
        assert_eq!(schema.industry, IndustrySource::prefix("ind_"));
    }
}
