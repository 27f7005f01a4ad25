//! Income sweeps over the tax calculator.
//!
//! Two series are produced:
//!
//! - a **comparison series**: for each income point, the tax liability,
//!   effective rate and net income of every requested scenario;
//! - an **optimization series**: for each income point, the tax saved by
//!   moving from no deductions to high deductions, compared with the after-tax
//!   value of earning [`INCOME_INCREASE`] more with no deductions.
//!
//! Every point of a sweep is computed; any failing point fails the whole call.

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::brackets::BracketSchedule;
use crate::calculations::calculator::{TaxCalculator, TaxError};
use crate::{
    ComparisonRow, OptimizationPoint, Recommendation, Scenario, ScenarioMetrics, TaxYearData,
};

/// The extra gross income the optimization series weighs against deductions.
pub const INCOME_INCREASE: Decimal = Decimal::from_parts(100_000, 0, 0, false, 0);

/// An inclusive income sweep `min, min + step, ...` up to `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncomeRange {
    min: Decimal,
    max: Decimal,
    step: Decimal,
}

impl IncomeRange {
    /// Creates a sweep. A `min` above `max` yields no points.
    ///
    /// # Errors
    ///
    /// Returns [`TaxError::InvalidIncome`] for a negative `min` and
    /// [`TaxError::InvalidStep`] for a step that is zero or negative.
    pub fn new(
        min: Decimal,
        max: Decimal,
        step: Decimal,
    ) -> Result<Self, TaxError> {
        if min < Decimal::ZERO {
            return Err(TaxError::InvalidIncome(min));
        }
        if step <= Decimal::ZERO {
            return Err(TaxError::InvalidStep(step));
        }
        Ok(Self { min, max, step })
    }

    /// Income points in ascending order.
    pub fn points(&self) -> impl Iterator<Item = Decimal> + use<> {
        let Self { min, max, step } = *self;
        std::iter::successors(Some(min), move |income| income.checked_add(step))
            .take_while(move |income| *income <= max)
    }
}

/// Produces comparison and optimization series for a tax year.
#[derive(Clone, Copy)]
pub struct SeriesGenerator<'a> {
    calculator: TaxCalculator<'a>,
}

impl<'a> SeriesGenerator<'a> {
    pub fn new(calculator: TaxCalculator<'a>) -> Self {
        Self { calculator }
    }

    /// Comparison series for scenarios identified by catalog key.
    ///
    /// # Errors
    ///
    /// Returns [`TaxError`] for an unknown year or scenario key, or an
    /// invalid range.
    pub fn generate_comparison_series<S: AsRef<str>>(
        &self,
        min_income: Decimal,
        max_income: Decimal,
        step: Decimal,
        scenario_keys: &[S],
        tax_year: &str,
    ) -> Result<Vec<ComparisonRow>, TaxError> {
        let range = IncomeRange::new(min_income, max_income, step)?;
        let scenarios = scenario_keys
            .iter()
            .map(|key| key.as_ref().parse())
            .collect::<Result<Vec<Scenario>, _>>()?;

        self.comparison_series(&range, &scenarios, tax_year)
    }

    /// One [`ComparisonRow`] per income point, with metrics for each of
    /// `scenarios` in the order given.
    ///
    /// # Errors
    ///
    /// Returns [`TaxError`] if the tax year is unknown or any point fails.
    pub fn comparison_series(
        &self,
        range: &IncomeRange,
        scenarios: &[Scenario],
        tax_year: &str,
    ) -> Result<Vec<ComparisonRow>, TaxError> {
        let year = self.calculator.year_data(tax_year)?;

        let rows = range
            .points()
            .map(|gross_income| -> Result<ComparisonRow, TaxError> {
                let metrics = scenarios
                    .iter()
                    .map(|&scenario| -> Result<ScenarioMetrics, TaxError> {
                        let result =
                            TaxCalculator::calculate_for_year(year, gross_income, scenario)?;
                        Ok(ScenarioMetrics {
                            scenario,
                            tax_liability: result.final_tax,
                            effective_rate: result.effective_rate,
                            net_income: result.net_income,
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(ComparisonRow {
                    gross_income,
                    scenarios: metrics,
                })
            })
            .collect::<Result<Vec<_>, TaxError>>()?;

        debug!(tax_year, rows = rows.len(), "generated comparison series");
        Ok(rows)
    }

    /// Optimization series from raw bounds.
    ///
    /// # Errors
    ///
    /// Returns [`TaxError`] for an unknown year or an invalid range.
    pub fn generate_optimization_series(
        &self,
        min_income: Decimal,
        max_income: Decimal,
        step: Decimal,
        tax_year: &str,
    ) -> Result<Vec<OptimizationPoint>, TaxError> {
        let range = IncomeRange::new(min_income, max_income, step)?;
        self.optimization_series(&range, tax_year)
    }

    /// One [`OptimizationPoint`] per income point.
    ///
    /// Always compares [`Scenario::NoDeductions`] with
    /// [`Scenario::HighDeductions`], regardless of any scenario selection.
    ///
    /// # Errors
    ///
    /// Returns [`TaxError`] if the tax year is unknown or any point fails.
    pub fn optimization_series(
        &self,
        range: &IncomeRange,
        tax_year: &str,
    ) -> Result<Vec<OptimizationPoint>, TaxError> {
        let year = self.calculator.year_data(tax_year)?;

        let points = range
            .points()
            .map(|income| Self::optimization_point(year, income))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(tax_year, points = points.len(), "generated optimization series");
        Ok(points)
    }

    /// Weighs maximizing deductions against earning [`INCOME_INCREASE`] more
    /// at a single income.
    ///
    /// # Errors
    ///
    /// Returns [`TaxError`] if `income` is negative or too large to raise by
    /// [`INCOME_INCREASE`], or if the year has no brackets.
    pub fn optimization_point(
        year: &TaxYearData,
        income: Decimal,
    ) -> Result<OptimizationPoint, TaxError> {
        let higher_gross = income
            .checked_add(INCOME_INCREASE)
            .ok_or(TaxError::InvalidIncome(income))?;

        let no_deductions = TaxCalculator::calculate_for_year(year, income, Scenario::NoDeductions)?;
        let high_deductions =
            TaxCalculator::calculate_for_year(year, income, Scenario::HighDeductions)?;
        let higher_income =
            TaxCalculator::calculate_for_year(year, higher_gross, Scenario::NoDeductions)?;

        let tax_savings_from_deductions = no_deductions.final_tax - high_deductions.final_tax;
        let additional_tax = higher_income.final_tax - no_deductions.final_tax;
        let net_benefit_from_earning = INCOME_INCREASE - additional_tax;

        let tax_efficiency_score = if income > Decimal::ZERO {
            tax_savings_from_deductions / (income * Decimal::new(1, 2))
        } else {
            Decimal::ZERO
        };

        let deduction_recommendation = if tax_savings_from_deductions > net_benefit_from_earning {
            Recommendation::FocusOnDeductions
        } else {
            Recommendation::FocusOnEarning
        };

        let marginal_rate =
            BracketSchedule::new(&year.brackets).marginal_rate(income)? * Decimal::ONE_HUNDRED;

        Ok(OptimizationPoint {
            income,
            marginal_rate,
            tax_savings_from_deductions,
            net_benefit_from_earning,
            tax_efficiency_score,
            should_maximize_deductions: tax_savings_from_deductions
                > net_benefit_from_earning * Decimal::new(5, 1),
            break_even_point: tax_savings_from_deductions / INCOME_INCREASE,
            deduction_recommendation,
        })
    }
}
