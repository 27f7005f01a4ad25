use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{DeductionBreakdown, Scenario};

/// Full tax liability for one (income, scenario, year) query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResult {
    pub scenario: Scenario,
    pub gross_income: Decimal,
    pub taxable_income: Decimal,
    pub tax_before_rebates: Decimal,
    pub total_rebates: Decimal,
    pub final_tax: Decimal,
    /// Final tax as a percentage of gross income.
    pub effective_rate: Decimal,
    /// Rate of the bracket containing taxable income, as a percentage.
    pub marginal_rate: Decimal,
    pub deductions: Decimal,
    pub net_income: Decimal,
    pub deduction_breakdown: DeductionBreakdown,
}
