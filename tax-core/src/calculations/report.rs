//! Assembles everything a presentation layer needs for one view.
//!
//! A [`ReportRequest`] carries the user's selections; [`ReportBuilder`]
//! answers it with a comparison series over the selected scenarios, the
//! optimization series when enabled, and the year's bracket table.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::calculations::calculator::{TaxCalculator, TaxError};
use crate::calculations::series::{IncomeRange, SeriesGenerator};
use crate::{ComparisonRow, DisplayMetric, OptimizationPoint, Scenario, TaxBracket};

pub const DEFAULT_TAX_YEAR: &str = "2025-26";

pub const DEFAULT_INCOME_CEILING: Decimal = Decimal::from_parts(2_500_000, 0, 0, false, 0);

/// Income ceilings offered to users.
pub const INCOME_CEILING_PRESETS: [Decimal; 3] = [
    Decimal::from_parts(1_500_000, 0, 0, false, 0),
    DEFAULT_INCOME_CEILING,
    Decimal::from_parts(3_000_000, 0, 0, false, 0),
];

/// First income point of both series.
pub const SERIES_START: Decimal = Decimal::from_parts(250_000, 0, 0, false, 0);

pub const COMPARISON_STEP: Decimal = Decimal::from_parts(100_000, 0, 0, false, 0);

pub const OPTIMIZATION_STEP: Decimal = Decimal::from_parts(50_000, 0, 0, false, 0);

/// User selections for a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRequest {
    pub tax_year: String,
    pub income_ceiling: Decimal,
    pub scenarios: Vec<Scenario>,
    pub display_metric: DisplayMetric,
    pub optimization_enabled: bool,
}

impl Default for ReportRequest {
    fn default() -> Self {
        Self {
            tax_year: DEFAULT_TAX_YEAR.to_string(),
            income_ceiling: DEFAULT_INCOME_CEILING,
            scenarios: vec![Scenario::NoDeductions, Scenario::AverageDeductions],
            display_metric: DisplayMetric::TaxLiability,
            optimization_enabled: false,
        }
    }
}

/// The computed answer to a [`ReportRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxReport {
    pub tax_year: String,
    pub display_metric: DisplayMetric,
    /// Selected scenarios without duplicates, in selection order.
    pub scenarios: Vec<Scenario>,
    pub comparison: Vec<ComparisonRow>,
    /// Present only when optimization was requested.
    pub optimization: Option<Vec<OptimizationPoint>>,
    pub brackets: Vec<TaxBracket>,
}

#[derive(Clone, Copy)]
pub struct ReportBuilder<'a> {
    calculator: TaxCalculator<'a>,
}

impl<'a> ReportBuilder<'a> {
    pub fn new(calculator: TaxCalculator<'a>) -> Self {
        Self { calculator }
    }

    /// Builds the report for `request`.
    ///
    /// # Errors
    ///
    /// Returns [`TaxError`] if:
    /// - the tax year is unknown
    /// - the income ceiling is not positive
    pub fn build(
        &self,
        request: &ReportRequest,
    ) -> Result<TaxReport, TaxError> {
        if request.income_ceiling <= Decimal::ZERO {
            return Err(TaxError::InvalidIncome(request.income_ceiling));
        }

        let year = self.calculator.year_data(&request.tax_year)?;
        let generator = SeriesGenerator::new(self.calculator);

        let mut scenarios: Vec<Scenario> = Vec::with_capacity(request.scenarios.len());
        for scenario in &request.scenarios {
            if !scenarios.contains(scenario) {
                scenarios.push(*scenario);
            }
        }

        let comparison_range = IncomeRange::new(SERIES_START, request.income_ceiling, COMPARISON_STEP)?;
        let comparison = generator.comparison_series(&comparison_range, &scenarios, &request.tax_year)?;

        let optimization = if request.optimization_enabled {
            let range = IncomeRange::new(SERIES_START, request.income_ceiling, OPTIMIZATION_STEP)?;
            Some(generator.optimization_series(&range, &request.tax_year)?)
        } else {
            None
        };

        info!(
            tax_year = %request.tax_year,
            scenarios = scenarios.len(),
            rows = comparison.len(),
            optimization = request.optimization_enabled,
            "built tax report"
        );

        Ok(TaxReport {
            tax_year: request.tax_year.clone(),
            display_metric: request.display_metric,
            scenarios,
            comparison,
            optimization,
            brackets: year.brackets.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::test_support::test_tables;

    #[test]
    fn default_request_matches_initial_selection() {
        let request = ReportRequest::default();

        assert_eq!(request.tax_year, "2025-26");
        assert_eq!(request.income_ceiling, dec!(2500000));
        assert_eq!(
            request.scenarios,
            vec![Scenario::NoDeductions, Scenario::AverageDeductions]
        );
        assert_eq!(request.display_metric, DisplayMetric::TaxLiability);
        assert!(!request.optimization_enabled);
    }

    #[test]
    fn build_default_report() {
        let tables = test_tables();
        let builder = ReportBuilder::new(TaxCalculator::new(&tables));

        let report = builder.build(&ReportRequest::default()).unwrap();

        // 250k, 350k, ... 2450k
        assert_eq!(report.comparison.len(), 23);
        assert_eq!(report.comparison[0].income_label(), "R250k");
        assert_eq!(report.comparison[22].gross_income, dec!(2450000));
        assert_eq!(report.optimization, None);
        assert_eq!(report.brackets.len(), 7);
    }

    #[test]
    fn build_with_optimization_uses_finer_step() {
        let tables = test_tables();
        let builder = ReportBuilder::new(TaxCalculator::new(&tables));
        let request = ReportRequest {
            income_ceiling: dec!(1500000),
            optimization_enabled: true,
            ..ReportRequest::default()
        };

        let report = builder.build(&request).unwrap();

        assert_eq!(report.comparison.len(), 13);
        assert_eq!(report.optimization.map(|points| points.len()), Some(26));
    }

    #[test]
    fn build_removes_duplicate_scenarios() {
        let tables = test_tables();
        let builder = ReportBuilder::new(TaxCalculator::new(&tables));
        let request = ReportRequest {
            scenarios: vec![
                Scenario::HighDeductions,
                Scenario::NoDeductions,
                Scenario::HighDeductions,
            ],
            ..ReportRequest::default()
        };

        let report = builder.build(&request).unwrap();

        assert_eq!(
            report.scenarios,
            vec![Scenario::HighDeductions, Scenario::NoDeductions]
        );
        assert_eq!(report.comparison[0].scenarios.len(), 2);
    }

    #[test]
    fn build_rejects_non_positive_ceiling() {
        let tables = test_tables();
        let builder = ReportBuilder::new(TaxCalculator::new(&tables));
        let request = ReportRequest {
            income_ceiling: dec!(0),
            ..ReportRequest::default()
        };

        assert_eq!(builder.build(&request), Err(TaxError::InvalidIncome(dec!(0))));
    }

    #[test]
    fn build_rejects_unknown_year() {
        let tables = test_tables();
        let builder = ReportBuilder::new(TaxCalculator::new(&tables));
        let request = ReportRequest {
            tax_year: "2019-20".to_string(),
            ..ReportRequest::default()
        };

        assert_eq!(
            builder.build(&request),
            Err(TaxError::UnknownYear("2019-20".to_string()))
        );
    }

    #[test]
    fn ceiling_below_series_start_gives_empty_series() {
        let tables = test_tables();
        let builder = ReportBuilder::new(TaxCalculator::new(&tables));
        let request = ReportRequest {
            income_ceiling: dec!(200000),
            optimization_enabled: true,
            ..ReportRequest::default()
        };

        let report = builder.build(&request).unwrap();

        assert!(report.comparison.is_empty());
        assert_eq!(report.optimization, Some(vec![]));
    }
}
