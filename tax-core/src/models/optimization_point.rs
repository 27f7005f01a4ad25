use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which lever pays off more at a given income.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    #[serde(rename = "Focus on Deductions")]
    FocusOnDeductions,
    #[serde(rename = "Focus on Earning More")]
    FocusOnEarning,
}

impl Recommendation {
    pub fn label(&self) -> &'static str {
        match self {
            Self::FocusOnDeductions => "Focus on Deductions",
            Self::FocusOnEarning => "Focus on Earning More",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// "Deduct more vs. earn more" comparison at one income level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizationPoint {
    pub income: Decimal,
    /// Marginal rate at the gross income, as a percentage.
    pub marginal_rate: Decimal,
    /// Tax saved by the high-deductions scenario relative to no deductions.
    pub tax_savings_from_deductions: Decimal,
    /// What a fixed income increase is worth after the extra tax.
    pub net_benefit_from_earning: Decimal,
    /// Savings per percent of income. Informational only.
    pub tax_efficiency_score: Decimal,
    pub should_maximize_deductions: bool,
    pub break_even_point: Decimal,
    pub deduction_recommendation: Recommendation,
}
