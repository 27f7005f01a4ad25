//! Command implementations, independent of argument parsing.

use std::io::Write;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use tax_core::TaxTableRepository;
use tax_core::calculations::{ReportBuilder, ReportRequest, TaxCalculator};
use tracing::info;

use crate::output::{self, OutputFormat};

pub fn run_report<W: Write>(
    out: &mut W,
    tables: &dyn TaxTableRepository,
    request: &ReportRequest,
    format: OutputFormat,
) -> Result<()> {
    let report = ReportBuilder::new(TaxCalculator::new(tables))
        .build(request)
        .context("cannot build report")?;

    info!(
        tax_year = %report.tax_year,
        metric = %report.display_metric,
        "printing report"
    );
    output::write_report(out, format, &report)
}

pub fn run_calc<W: Write>(
    out: &mut W,
    tables: &dyn TaxTableRepository,
    gross_income: Decimal,
    scenario_key: &str,
    tax_year: &str,
    format: OutputFormat,
) -> Result<()> {
    let result = TaxCalculator::new(tables)
        .compute_tax(gross_income, scenario_key, tax_year)
        .with_context(|| format!("cannot compute tax on {gross_income}"))?;

    output::write_result(out, format, &result)
}

pub fn run_brackets<W: Write>(
    out: &mut W,
    tables: &dyn TaxTableRepository,
    tax_year: &str,
    format: OutputFormat,
) -> Result<()> {
    let year = TaxCalculator::new(tables).year_data(tax_year)?;

    output::write_brackets(out, format, &year.brackets)
}

pub fn run_years<W: Write>(
    out: &mut W,
    tables: &dyn TaxTableRepository,
    format: OutputFormat,
) -> Result<()> {
    output::write_years(out, format, &tables.list_tax_years())
}

pub fn run_scenarios<W: Write>(
    out: &mut W,
    format: OutputFormat,
) -> Result<()> {
    output::write_scenarios(out, format)
}
