//! Tax calculations: bracket schedules, deduction scenarios, the tax
//! calculator, income sweeps and report assembly.

pub mod brackets;
pub mod calculator;
pub mod common;
pub mod report;
pub mod scenarios;
pub mod series;

#[cfg(test)]
mod test_support;

pub use brackets::{BracketError, BracketSchedule};
pub use calculator::{TaxCalculator, TaxError};
pub use report::{ReportBuilder, ReportRequest, TaxReport};
pub use scenarios::RETIREMENT_CONTRIBUTION_CAP;
pub use series::{INCOME_INCREASE, IncomeRange, SeriesGenerator};
