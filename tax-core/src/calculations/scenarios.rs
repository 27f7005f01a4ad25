//! Deduction strategies for the built-in [`Scenario`]s.
//!
//! | Scenario                | Retirement                    | Medical aid (annual)                          |
//! |-------------------------|-------------------------------|-----------------------------------------------|
//! | no-deductions           | 0                             | 0                                             |
//! | conservative-deductions | `min(10% of gross, 350000)`   | `member × 12`                                 |
//! | average-deductions      | `min(20% of gross, 350000)`   | `(member + dependent1) × 12`                  |
//! | high-deductions         | `min(27.5% of gross, 350000)` | `(member + dependent1 + 2 × dependent_other) × 12` |
//!
//! The medical tax credit equals the annual medical aid amount. Every
//! scenario models a taxpayer under 65.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::calculations::calculator::TaxError;
use crate::{AgeBand, DeductionBreakdown, MedicalCredits, Scenario, TaxYearData};

/// Annual ceiling on deductible retirement contributions.
pub const RETIREMENT_CONTRIBUTION_CAP: Decimal = Decimal::from_parts(350_000, 0, 0, false, 0);

const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

impl Scenario {
    /// Share of gross income contributed to retirement, before the cap.
    pub fn retirement_rate(&self) -> Decimal {
        match self {
            Self::NoDeductions => Decimal::ZERO,
            Self::ConservativeDeductions => Decimal::new(10, 2),
            Self::AverageDeductions => Decimal::new(20, 2),
            Self::HighDeductions => Decimal::new(275, 3),
        }
    }

    /// Monthly medical credit for the household this scenario models.
    fn monthly_medical_credit(
        &self,
        credits: &MedicalCredits,
    ) -> Decimal {
        match self {
            Self::NoDeductions => Decimal::ZERO,
            Self::ConservativeDeductions => credits.member,
            Self::AverageDeductions => credits.member + credits.dependent1,
            Self::HighDeductions => {
                credits.member + credits.dependent1 + credits.dependent_other * Decimal::TWO
            }
        }
    }

    /// Computes the deductions this scenario claims on `gross_income`.
    ///
    /// Retirement contributions are a share of gross (not taxable) income.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use tax_core::{MedicalCredits, Rebates, Scenario, TaxYearData};
    ///
    /// let year = TaxYearData {
    ///     tax_year: "2025-26".to_string(),
    ///     brackets: vec![],
    ///     rebates: Rebates {
    ///         primary: dec!(17235),
    ///         secondary: dec!(9444),
    ///         tertiary: dec!(3145),
    ///     },
    ///     medical_credits: MedicalCredits {
    ///         member: dec!(364),
    ///         dependent1: dec!(364),
    ///         dependent_other: dec!(246),
    ///     },
    /// };
    ///
    /// let deductions = Scenario::HighDeductions.deductions(dec!(1000000), &year);
    ///
    /// assert_eq!(deductions.retirement_contribution, dec!(275000));
    /// assert_eq!(deductions.medical_aid_contribution, dec!(14640));
    /// assert_eq!(deductions.total_deductions, dec!(289640));
    /// ```
    pub fn deductions(
        &self,
        gross_income: Decimal,
        year: &TaxYearData,
    ) -> DeductionBreakdown {
        let retirement_contribution =
            (gross_income * self.retirement_rate()).min(RETIREMENT_CONTRIBUTION_CAP);
        let medical_aid_contribution =
            self.monthly_medical_credit(&year.medical_credits) * MONTHS_PER_YEAR;

        DeductionBreakdown {
            retirement_contribution,
            medical_aid_contribution,
            medical_tax_credit: medical_aid_contribution,
            total_deductions: retirement_contribution + medical_aid_contribution,
            age_band: AgeBand::Under65,
        }
    }
}

impl FromStr for Scenario {
    type Err = TaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| TaxError::UnknownScenario(s.to_string()))
    }
}
