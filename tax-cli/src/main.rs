use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use rust_decimal::Decimal;
use tax_core::calculations::report::DEFAULT_TAX_YEAR;
use tax_core::{DisplayMetric, Scenario};
use tracing::debug;

use tax_cli::utils::{ceiling_presets_help, parse_decimal};
use tax_cli::{app, config::AppConfig, logging, output::OutputFormat};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Compares income tax across deduction scenarios and shows where
/// maximizing deductions beats earning more.
#[derive(Debug, Parser)]
#[command(name = "tax-optimizer", version, about)]
struct Cli {
    /// Output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,

    /// Settings file. Defaults to `tax-optimizer.toml` when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level or filter directive. `RUST_LOG` takes precedence.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also append logs to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Scenario comparison, optional optimization series and bracket table.
    Report {
        /// Tax year, e.g. 2025-26.
        #[arg(long)]
        year: Option<String>,

        /// Highest income in the series, e.g. 3,000,000.
        #[arg(long, value_parser = parse_decimal)]
        max_income: Option<Decimal>,

        /// Scenario to compare. Repeat for several.
        #[arg(long = "scenario")]
        scenarios: Vec<Scenario>,

        /// Figure shown per scenario.
        #[arg(long)]
        metric: Option<DisplayMetric>,

        /// Include the deductions vs. earning analysis.
        #[arg(long)]
        optimize: bool,
    },

    /// Tax for a single income and scenario.
    Calc {
        /// Gross annual income.
        #[arg(long, value_parser = parse_decimal)]
        income: Decimal,

        /// Scenario key, e.g. average-deductions.
        #[arg(long, default_value = "no-deductions")]
        scenario: String,

        #[arg(long)]
        year: Option<String>,
    },

    /// Bracket table for a tax year.
    Brackets {
        #[arg(long)]
        year: Option<String>,
    },

    /// Available tax years.
    Years,

    /// The scenario catalog.
    Scenarios,
}

// ─── entry point ─────────────────────────────────────────────────────────────

/// Parses arguments, adding the ceiling presets to the `report` help.
fn parse_cli() -> Cli {
    let matches = Cli::command()
        .mut_subcommand("report", |report| report.after_help(ceiling_presets_help()))
        .get_matches();
    Cli::from_arg_matches(&matches).unwrap_or_else(|err| err.exit())
}

fn main() -> Result<()> {
    let cli = parse_cli();

    let config = AppConfig::load(cli.config.as_deref())?;
    let log_level = cli.log_level.as_deref().unwrap_or(config.log_level());
    let log_file = cli.log_file.as_deref().or(config.log_file.as_deref());
    logging::init(log_level, log_file)?;

    let format = cli.format.unwrap_or(config.output_format());
    let tables = tax_data::reference_tables().context("cannot load reference tax tables")?;
    debug!(?format, command = ?cli.command, "running");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Report {
            year,
            max_income,
            scenarios,
            metric,
            optimize,
        } => {
            let mut request = config.report_request();
            if let Some(year) = year {
                request.tax_year = year;
            }
            if let Some(max_income) = max_income {
                request.income_ceiling = max_income;
            }
            if !scenarios.is_empty() {
                request.scenarios = scenarios;
            }
            if let Some(metric) = metric {
                request.display_metric = metric;
            }
            request.optimization_enabled |= optimize;

            app::run_report(&mut out, tables, &request, format)?;
        }
        Command::Calc {
            income,
            scenario,
            year,
        } => {
            let year = year_or_default(year, &config);
            app::run_calc(&mut out, tables, income, &scenario, &year, format)?;
        }
        Command::Brackets { year } => {
            let year = year_or_default(year, &config);
            app::run_brackets(&mut out, tables, &year, format)?;
        }
        Command::Years => app::run_years(&mut out, tables, format)?,
        Command::Scenarios => app::run_scenarios(&mut out, format)?,
    }

    out.flush().context("cannot write output")
}

fn year_or_default(
    year: Option<String>,
    config: &AppConfig,
) -> String {
    year.or_else(|| config.tax_year.clone())
        .unwrap_or_else(|| DEFAULT_TAX_YEAR.to_string())
}
