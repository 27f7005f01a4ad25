use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::AgeBand;

/// Annual deductions and credits produced by a scenario for one gross income.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionBreakdown {
    pub retirement_contribution: Decimal,
    pub medical_aid_contribution: Decimal,
    /// Credit subtracted from tax owed, not from taxable income.
    pub medical_tax_credit: Decimal,
    /// Retirement plus medical aid contributions.
    pub total_deductions: Decimal,
    pub age_band: AgeBand,
}

impl DeductionBreakdown {
    /// A breakdown with no deductions or credits for a taxpayer under 65.
    pub fn none() -> Self {
        Self {
            retirement_contribution: Decimal::ZERO,
            medical_aid_contribution: Decimal::ZERO,
            medical_tax_credit: Decimal::ZERO,
            total_deductions: Decimal::ZERO,
            age_band: AgeBand::Under65,
        }
    }
}
