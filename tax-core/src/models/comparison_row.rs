use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Scenario;

/// The figure a caller chooses to chart from a comparison series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayMetric {
    #[default]
    TaxLiability,
    EffectiveRate,
    #[serde(alias = "netIncome")]
    NetIncome,
}

impl DisplayMetric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TaxLiability => "tax-liability",
            Self::EffectiveRate => "effective-rate",
            Self::NetIncome => "net-income",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "tax-liability" => Some(Self::TaxLiability),
            "effective-rate" => Some(Self::EffectiveRate),
            "net-income" | "netIncome" => Some(Self::NetIncome),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::TaxLiability => "Tax Liability",
            Self::EffectiveRate => "Effective Tax Rate",
            Self::NetIncome => "Net Income",
        }
    }
}

impl fmt::Display for DisplayMetric {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognized [`DisplayMetric`] key.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown display metric '{0}'")]
pub struct UnknownDisplayMetric(pub String);

impl FromStr for DisplayMetric {
    type Err = UnknownDisplayMetric;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownDisplayMetric(s.to_string()))
    }
}

/// The three figures computed for one scenario at one income point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioMetrics {
    pub scenario: Scenario,
    pub tax_liability: Decimal,
    pub effective_rate: Decimal,
    pub net_income: Decimal,
}

impl ScenarioMetrics {
    pub fn metric(
        &self,
        metric: DisplayMetric,
    ) -> Decimal {
        match metric {
            DisplayMetric::TaxLiability => self.tax_liability,
            DisplayMetric::EffectiveRate => self.effective_rate,
            DisplayMetric::NetIncome => self.net_income,
        }
    }
}

/// One income point of a comparison series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub gross_income: Decimal,
    pub scenarios: Vec<ScenarioMetrics>,
}

impl ComparisonRow {
    /// Axis label in thousands of rand, e.g. `R250k`.
    pub fn income_label(&self) -> String {
        let thousands = (self.gross_income / Decimal::ONE_THOUSAND).round();
        format!("R{thousands}k")
    }

    pub fn get(
        &self,
        scenario: Scenario,
    ) -> Option<&ScenarioMetrics> {
        self.scenarios.iter().find(|m| m.scenario == scenario)
    }

    /// The chosen metric for `scenario`, if it was part of the row.
    pub fn value(
        &self,
        scenario: Scenario,
        metric: DisplayMetric,
    ) -> Option<Decimal> {
        self.get(scenario).map(|m| m.metric(metric))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn display_metric_from_str_accepts_keys_and_alias() {
        assert_eq!("tax-liability".parse::<DisplayMetric>(), Ok(DisplayMetric::TaxLiability));
        assert_eq!("effective-rate".parse::<DisplayMetric>(), Ok(DisplayMetric::EffectiveRate));
        assert_eq!("netIncome".parse::<DisplayMetric>(), Ok(DisplayMetric::NetIncome));
    }

    #[test]
    fn display_metric_from_str_rejects_unknown_keys() {
        let result = "marginal-rate".parse::<DisplayMetric>();

        assert_eq!(result, Err(UnknownDisplayMetric("marginal-rate".to_string())));
        assert_eq!(
            result.unwrap_err().to_string(),
            "unknown display metric 'marginal-rate'"
        );
    }
}
