//! Renders results as aligned text tables, CSV, or JSON.

use std::io::Write;

use anyhow::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tax_core::calculations::TaxReport;
use tax_core::{ComparisonRow, DisplayMetric, OptimizationPoint, Scenario, TaxBracket, TaxResult};

use crate::utils::{format_percent, format_rand};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
}

// ─── text tables ─────────────────────────────────────────────────────────────

/// Writes rows as space-padded columns. The first column is left-aligned,
/// the rest right-aligned.
fn write_table<W: Write>(
    out: &mut W,
    header: &[String],
    rows: &[Vec<String>],
) -> Result<()> {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut line = |cells: &[String]| -> Result<()> {
        let mut text = String::new();
        for (i, (cell, width)) in cells.iter().zip(&widths).enumerate() {
            if i == 0 {
                text.push_str(&format!("{cell:<width$}"));
            } else {
                text.push_str(&format!("  {cell:>width$}"));
            }
        }
        writeln!(out, "{}", text.trim_end())?;
        Ok(())
    };

    line(header)?;
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    line(rule.as_slice())?;
    for row in rows {
        line(row.as_slice())?;
    }
    Ok(())
}

fn write_csv<W: Write>(
    out: &mut W,
    header: &[String],
    rows: &[Vec<String>],
) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(header)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_rows<W: Write>(
    out: &mut W,
    format: OutputFormat,
    header: &[String],
    rows: &[Vec<String>],
) -> Result<()> {
    match format {
        OutputFormat::Csv => write_csv(out, header, rows),
        _ => write_table(out, header, rows),
    }
}

fn write_json<W: Write, T: Serialize + ?Sized>(
    out: &mut W,
    value: &T,
) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn headers(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

/// Human-readable text for table output, raw numbers for CSV.
fn money(
    format: OutputFormat,
    amount: rust_decimal::Decimal,
) -> String {
    match format {
        OutputFormat::Table => format_rand(amount),
        _ => amount.to_string(),
    }
}

fn percent(
    format: OutputFormat,
    rate: rust_decimal::Decimal,
) -> String {
    match format {
        OutputFormat::Table => format_percent(rate),
        _ => rate.to_string(),
    }
}

fn metric_cell(
    format: OutputFormat,
    metric: DisplayMetric,
    value: rust_decimal::Decimal,
) -> String {
    match metric {
        DisplayMetric::EffectiveRate => percent(format, value),
        DisplayMetric::TaxLiability | DisplayMetric::NetIncome => money(format, value),
    }
}

// ─── sections ────────────────────────────────────────────────────────────────

/// One row per income, one column per scenario, showing `metric`.
pub fn write_comparison<W: Write>(
    out: &mut W,
    format: OutputFormat,
    metric: DisplayMetric,
    scenarios: &[Scenario],
    rows: &[ComparisonRow],
) -> Result<()> {
    if format == OutputFormat::Json {
        return write_json(out, rows);
    }

    let mut header = vec!["income".to_string()];
    header.extend(scenarios.iter().map(|s| match format {
        OutputFormat::Table => s.name().to_string(),
        _ => s.as_str().to_string(),
    }));

    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            let mut cells = vec![match format {
                OutputFormat::Table => row.income_label(),
                _ => row.gross_income.to_string(),
            }];
            cells.extend(scenarios.iter().map(|&scenario| {
                row.value(scenario, metric)
                    .map(|value| metric_cell(format, metric, value))
                    .unwrap_or_default()
            }));
            cells
        })
        .collect();

    write_rows(out, format, &header, &body)
}

pub fn write_optimization<W: Write>(
    out: &mut W,
    format: OutputFormat,
    points: &[OptimizationPoint],
) -> Result<()> {
    if format == OutputFormat::Json {
        return write_json(out, points);
    }

    let header = headers(&[
        "income",
        "marginal_rate",
        "tax_savings_from_deductions",
        "net_benefit_from_earning",
        "tax_efficiency_score",
        "should_maximize_deductions",
        "break_even_point",
        "recommendation",
    ]);

    let body: Vec<Vec<String>> = points
        .iter()
        .map(|point| {
            vec![
                money(format, point.income),
                percent(format, point.marginal_rate),
                money(format, point.tax_savings_from_deductions),
                money(format, point.net_benefit_from_earning),
                point.tax_efficiency_score.round_dp(4).to_string(),
                point.should_maximize_deductions.to_string(),
                point.break_even_point.round_dp(4).to_string(),
                point.deduction_recommendation.label().to_string(),
            ]
        })
        .collect();

    write_rows(out, format, &header, &body)
}

pub fn write_brackets<W: Write>(
    out: &mut W,
    format: OutputFormat,
    brackets: &[TaxBracket],
) -> Result<()> {
    if format == OutputFormat::Json {
        return write_json(out, brackets);
    }

    let header = headers(&["min_income", "max_income", "rate", "base_tax"]);
    let body: Vec<Vec<String>> = brackets
        .iter()
        .map(|bracket| {
            let max_income = match (bracket.max_income, format) {
                (Some(max), _) => money(format, max),
                (None, OutputFormat::Table) => "and above".to_string(),
                (None, _) => String::new(),
            };
            vec![
                money(format, bracket.min_income),
                max_income,
                percent(format, bracket.tax_rate * rust_decimal::Decimal::ONE_HUNDRED),
                money(format, bracket.base_tax),
            ]
        })
        .collect();

    write_rows(out, format, &header, &body)
}

/// A single calculation as field/value pairs.
pub fn write_result<W: Write>(
    out: &mut W,
    format: OutputFormat,
    result: &TaxResult,
) -> Result<()> {
    if format == OutputFormat::Json {
        return write_json(out, result);
    }

    let breakdown = &result.deduction_breakdown;
    let pairs = [
        ("scenario", result.scenario.as_str().to_string()),
        ("gross_income", money(format, result.gross_income)),
        ("retirement_contribution", money(format, breakdown.retirement_contribution)),
        ("medical_aid_contribution", money(format, breakdown.medical_aid_contribution)),
        ("total_deductions", money(format, result.deductions)),
        ("taxable_income", money(format, result.taxable_income)),
        ("tax_before_rebates", money(format, result.tax_before_rebates)),
        ("total_rebates", money(format, result.total_rebates)),
        ("medical_tax_credit", money(format, breakdown.medical_tax_credit)),
        ("final_tax", money(format, result.final_tax)),
        ("effective_rate", percent(format, result.effective_rate)),
        ("marginal_rate", percent(format, result.marginal_rate)),
        ("net_income", money(format, result.net_income)),
    ];

    let header = headers(&["field", "value"]);
    let body: Vec<Vec<String>> = pairs
        .into_iter()
        .map(|(field, value)| vec![field.to_string(), value])
        .collect();

    write_rows(out, format, &header, &body)
}

pub fn write_years<W: Write>(
    out: &mut W,
    format: OutputFormat,
    years: &[&str],
) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(out, years),
        _ => {
            let body: Vec<Vec<String>> = years.iter().map(|y| vec![y.to_string()]).collect();
            write_rows(out, format, &headers(&["tax_year"]), &body)
        }
    }
}

#[derive(Serialize)]
struct ScenarioEntry {
    key: &'static str,
    name: &'static str,
    color: &'static str,
    description: &'static str,
    assumptions: &'static str,
}

pub fn write_scenarios<W: Write>(
    out: &mut W,
    format: OutputFormat,
) -> Result<()> {
    let entries: Vec<ScenarioEntry> = Scenario::ALL
        .iter()
        .map(|s| ScenarioEntry {
            key: s.as_str(),
            name: s.name(),
            color: s.color(),
            description: s.description(),
            assumptions: s.assumptions(),
        })
        .collect();

    match format {
        OutputFormat::Json => write_json(out, &entries),
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            for entry in &entries {
                writer.serialize(entry)?;
            }
            writer.flush()?;
            Ok(())
        }
        OutputFormat::Table => {
            for entry in &entries {
                writeln!(out, "{} ({})", entry.name, entry.key)?;
                writeln!(out, "  {}", entry.description)?;
                writeln!(out, "  {}", entry.assumptions)?;
            }
            Ok(())
        }
    }
}

/// Every section of a report. Sections are separated by a blank line, and
/// table mode adds a title above each one.
pub fn write_report<W: Write>(
    out: &mut W,
    format: OutputFormat,
    report: &TaxReport,
) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(out, report),
        OutputFormat::Csv => {
            write_comparison(
                out,
                format,
                report.display_metric,
                &report.scenarios,
                &report.comparison,
            )?;
            if let Some(points) = &report.optimization {
                writeln!(out)?;
                write_optimization(out, format, points)?;
            }
            writeln!(out)?;
            write_brackets(out, format, &report.brackets)
        }
        OutputFormat::Table => {
            writeln!(out, "{} by income, {}", report.display_metric.label(), report.tax_year)?;
            writeln!(out)?;
            write_comparison(
                out,
                format,
                report.display_metric,
                &report.scenarios,
                &report.comparison,
            )?;

            if let Some(points) = &report.optimization {
                writeln!(out)?;
                writeln!(out, "Deductions vs. earning more")?;
                writeln!(out)?;
                write_optimization(out, format, points)?;
            }

            writeln!(out)?;
            writeln!(out, "Tax brackets, {}", report.tax_year)?;
            writeln!(out)?;
            write_brackets(out, format, &report.brackets)
        }
    }
}
