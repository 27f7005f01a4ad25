//! Full tax liability for one (income, scenario, year) query.
//!
//! # Calculation Steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Look up the reference tables for the tax year |
//! | 2    | Apply the scenario's deductions to gross income |
//! | 3    | Taxable income = gross income - total deductions (minimum 0) |
//! | 4    | Tax before rebates from the bracket schedule |
//! | 5    | Rebates for the taxpayer's age band |
//! | 6    | Final tax = step 4 - step 5 - medical tax credit (minimum 0) |
//! | 7    | Effective rate, marginal rate and net income |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::calculations::TaxCalculator;
//! use tax_core::{InMemoryTaxTables, MedicalCredits, Rebates, TaxBracket, TaxYearData};
//!
//! let tables: InMemoryTaxTables = [TaxYearData {
//!     tax_year: "2025-26".to_string(),
//!     brackets: vec![
//!         TaxBracket {
//!             min_income: dec!(0),
//!             max_income: Some(dec!(237100)),
//!             tax_rate: dec!(0.18),
//!             base_tax: dec!(0),
//!         },
//!         TaxBracket {
//!             min_income: dec!(237101),
//!             max_income: None,
//!             tax_rate: dec!(0.26),
//!             base_tax: dec!(42678),
//!         },
//!     ],
//!     rebates: Rebates {
//!         primary: dec!(17235),
//!         secondary: dec!(9444),
//!         tertiary: dec!(3145),
//!     },
//!     medical_credits: MedicalCredits {
//!         member: dec!(364),
//!         dependent1: dec!(364),
//!         dependent_other: dec!(246),
//!     },
//! }]
//! .into_iter()
//! .collect();
//!
//! let calculator = TaxCalculator::new(&tables);
//! let result = calculator
//!     .compute_tax(dec!(300000), "no-deductions", "2025-26")
//!     .unwrap();
//!
//! assert_eq!(result.tax_before_rebates, dec!(59032.00));
//! assert_eq!(result.final_tax, dec!(41797.00));
//! assert_eq!(result.net_income, dec!(258203.00));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, warn};

use crate::calculations::brackets::{BracketError, BracketSchedule};
use crate::calculations::common::{non_negative, percentage_of, round_half_up};
use crate::{DeductionBreakdown, RepositoryError, Scenario, TaxResult, TaxTableRepository, TaxYearData};

/// Caller input errors and malformed reference data.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxError {
    /// The requested tax year is not in the reference tables.
    #[error("unknown tax year '{0}'")]
    UnknownYear(String),

    /// The requested scenario key is not in the catalog.
    #[error("unknown scenario '{0}'")]
    UnknownScenario(String),

    /// Gross income is negative, or an income bound is out of range.
    #[error("invalid income amount {0}")]
    InvalidIncome(Decimal),

    /// An income sweep step must be positive.
    #[error("income step must be positive, got {0}")]
    InvalidStep(Decimal),

    /// The year's bracket schedule could not be applied.
    #[error(transparent)]
    Brackets(#[from] BracketError),
}

impl From<RepositoryError> for TaxError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(year) => TaxError::UnknownYear(year),
        }
    }
}

/// Computes [`TaxResult`]s against a set of reference tables.
#[derive(Clone, Copy)]
pub struct TaxCalculator<'a> {
    tables: &'a dyn TaxTableRepository,
}

impl<'a> TaxCalculator<'a> {
    pub fn new(tables: &'a dyn TaxTableRepository) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &'a dyn TaxTableRepository {
        self.tables
    }

    /// Looks up the reference tables for `tax_year`.
    ///
    /// # Errors
    ///
    /// Returns [`TaxError::UnknownYear`] if the year is not present.
    pub fn year_data(
        &self,
        tax_year: &str,
    ) -> Result<&'a TaxYearData, TaxError> {
        Ok(self.tables.get_tax_year_data(tax_year)?)
    }

    /// Computes tax for a scenario identified by its catalog key.
    ///
    /// # Errors
    ///
    /// Returns [`TaxError`] if:
    /// - the tax year is unknown
    /// - the scenario key is unknown
    /// - `gross_income` is negative
    pub fn compute_tax(
        &self,
        gross_income: Decimal,
        scenario_key: &str,
        tax_year: &str,
    ) -> Result<TaxResult, TaxError> {
        let year = self.year_data(tax_year)?;
        let scenario: Scenario = scenario_key.parse()?;

        Self::calculate_for_year(year, gross_income, scenario)
    }

    /// Computes tax for a scenario in `tax_year`.
    ///
    /// # Errors
    ///
    /// Returns [`TaxError`] if the tax year is unknown or `gross_income` is
    /// negative.
    pub fn calculate(
        &self,
        gross_income: Decimal,
        scenario: Scenario,
        tax_year: &str,
    ) -> Result<TaxResult, TaxError> {
        let year = self.year_data(tax_year)?;

        Self::calculate_for_year(year, gross_income, scenario)
    }

    /// Computes tax for a scenario against already-resolved year tables.
    ///
    /// # Errors
    ///
    /// Returns [`TaxError::InvalidIncome`] if `gross_income` is negative.
    pub fn calculate_for_year(
        year: &TaxYearData,
        gross_income: Decimal,
        scenario: Scenario,
    ) -> Result<TaxResult, TaxError> {
        if gross_income < Decimal::ZERO {
            warn!(%gross_income, "rejected negative gross income");
            return Err(TaxError::InvalidIncome(gross_income));
        }

        let deductions = scenario.deductions(gross_income, year);
        Self::calculate_with_deductions(year, gross_income, scenario, deductions)
    }

    /// Computes tax from an explicit deduction breakdown.
    ///
    /// This is the step shared by every scenario; it also allows breakdowns
    /// for taxpayers in older age bands.
    ///
    /// # Errors
    ///
    /// Returns [`TaxError`] if `gross_income` is negative or the year has no
    /// brackets.
    pub fn calculate_with_deductions(
        year: &TaxYearData,
        gross_income: Decimal,
        scenario: Scenario,
        deductions: DeductionBreakdown,
    ) -> Result<TaxResult, TaxError> {
        if gross_income < Decimal::ZERO {
            return Err(TaxError::InvalidIncome(gross_income));
        }

        let schedule = BracketSchedule::new(&year.brackets);

        let taxable_income = non_negative(gross_income - deductions.total_deductions);
        let tax_before_rebates = schedule.tax_before_rebates(taxable_income)?;
        let total_rebates = year.rebates.total_for(deductions.age_band);
        let final_tax = round_half_up(non_negative(
            tax_before_rebates - total_rebates - deductions.medical_tax_credit,
        ));

        let effective_rate = percentage_of(final_tax, gross_income);
        let marginal_rate = schedule.marginal_rate(taxable_income)? * Decimal::ONE_HUNDRED;

        debug!(
            tax_year = %year.tax_year,
            %scenario,
            %gross_income,
            %taxable_income,
            %final_tax,
            "computed tax"
        );

        Ok(TaxResult {
            scenario,
            gross_income,
            taxable_income,
            tax_before_rebates,
            total_rebates,
            final_tax,
            effective_rate,
            marginal_rate,
            deductions: deductions.total_deductions,
            net_income: gross_income - final_tax,
            deduction_breakdown: deductions,
        })
    }
}
