use std::collections::BTreeMap;
use std::io::Read;

use rust_decimal::Decimal;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tax_core::calculations::{BracketError, BracketSchedule};
use tax_core::{InMemoryTaxTables, MedicalCredits, Rebates, TaxBracket, TaxYearData};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur when loading the reference tables.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TableLoadError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("no rebates for tax year {0}")]
    MissingRebates(String),

    #[error("no medical credits for tax year {0}")]
    MissingMedicalCredits(String),

    #[error("tax year {tax_year} appears more than once in {table}")]
    DuplicateYear {
        tax_year: String,
        table: &'static str,
    },

    #[error("invalid brackets for tax year {tax_year}: {source}")]
    InvalidBrackets {
        tax_year: String,
        #[source]
        source: BracketError,
    },
}

impl From<csv::Error> for TableLoadError {
    fn from(err: csv::Error) -> Self {
        TableLoadError::CsvParse(err.to_string())
    }
}

/// A single row of `brackets.csv`.
///
/// - `tax_year`: year key, e.g. `2025-26`
/// - `min_income`: lowest taxable income in the bracket
/// - `max_income`: highest taxable income in the bracket (empty for the top bracket)
/// - `rate`: marginal rate as a fraction, e.g. `0.26`
/// - `base_tax`: tax due on all income below `min_income`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketRecord {
    pub tax_year: String,
    pub min_income: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub max_income: Option<Decimal>,
    pub rate: Decimal,
    pub base_tax: Decimal,
}

/// A single row of `rebates.csv`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RebateRecord {
    pub tax_year: String,
    pub primary: Decimal,
    pub secondary: Decimal,
    pub tertiary: Decimal,
}

/// A single row of `medical_credits.csv`. Amounts are monthly.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MedicalCreditRecord {
    pub tax_year: String,
    pub member: Decimal,
    pub dependent1: Decimal,
    pub dependent_other: Decimal,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

fn parse_records<T: DeserializeOwned, R: Read>(reader: R) -> Result<Vec<T>, TableLoadError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();

    for result in csv_reader.deserialize() {
        let record: T = result?;
        records.push(record);
    }

    Ok(records)
}

/// Indexes per-year rows, rejecting a year that appears twice.
fn index_by_year<'r, T>(
    records: &'r [T],
    table: &'static str,
    year_of: impl Fn(&T) -> &str,
) -> Result<BTreeMap<&'r str, &'r T>, TableLoadError> {
    let mut by_year = BTreeMap::new();
    for record in records {
        let tax_year = year_of(record);
        if by_year.insert(tax_year, record).is_some() {
            return Err(TableLoadError::DuplicateYear {
                tax_year: tax_year.to_string(),
                table,
            });
        }
    }
    Ok(by_year)
}

/// Loader for the reference tables from CSV data.
///
/// Each table is parsed separately, then [`TaxTableLoader::assemble`]
/// joins them by tax year and validates every bracket schedule.
pub struct TaxTableLoader;

impl TaxTableLoader {
    /// Parse bracket rows from a CSV reader.
    pub fn parse_brackets<R: Read>(reader: R) -> Result<Vec<BracketRecord>, TableLoadError> {
        parse_records(reader)
    }

    /// Parse rebate rows from a CSV reader.
    pub fn parse_rebates<R: Read>(reader: R) -> Result<Vec<RebateRecord>, TableLoadError> {
        parse_records(reader)
    }

    /// Parse medical credit rows from a CSV reader.
    pub fn parse_medical_credits<R: Read>(
        reader: R
    ) -> Result<Vec<MedicalCreditRecord>, TableLoadError> {
        parse_records(reader)
    }

    /// Joins parsed rows into one [`TaxYearData`] per tax year.
    ///
    /// Brackets keep their file order within a year. Every year that has
    /// brackets must also have exactly one rebate row and one medical
    /// credit row.
    pub fn assemble(
        brackets: &[BracketRecord],
        rebates: &[RebateRecord],
        medical_credits: &[MedicalCreditRecord],
    ) -> Result<InMemoryTaxTables, TableLoadError> {
        let rebates = index_by_year(rebates, "rebates", |r| r.tax_year.as_str())?;
        let medical_credits =
            index_by_year(medical_credits, "medical credits", |r| r.tax_year.as_str())?;

        let mut schedules: BTreeMap<&str, Vec<TaxBracket>> = BTreeMap::new();
        for record in brackets {
            schedules
                .entry(record.tax_year.as_str())
                .or_default()
                .push(TaxBracket {
                    min_income: record.min_income,
                    max_income: record.max_income,
                    tax_rate: record.rate,
                    base_tax: record.base_tax,
                });
        }

        for tax_year in rebates.keys().chain(medical_credits.keys()) {
            if !schedules.contains_key(tax_year) {
                warn!(tax_year, "ignoring table row for a year without brackets");
            }
        }

        let mut tables = InMemoryTaxTables::new();
        for (tax_year, schedule) in schedules {
            BracketSchedule::new(&schedule)
                .validate()
                .map_err(|source| TableLoadError::InvalidBrackets {
                    tax_year: tax_year.to_string(),
                    source,
                })?;

            let rebate = rebates
                .get(tax_year)
                .ok_or_else(|| TableLoadError::MissingRebates(tax_year.to_string()))?;
            let credits = medical_credits
                .get(tax_year)
                .ok_or_else(|| TableLoadError::MissingMedicalCredits(tax_year.to_string()))?;

            debug!(tax_year, brackets = schedule.len(), "assembled tax year");

            tables.insert(TaxYearData {
                tax_year: tax_year.to_string(),
                brackets: schedule,
                rebates: Rebates {
                    primary: rebate.primary,
                    secondary: rebate.secondary,
                    tertiary: rebate.tertiary,
                },
                medical_credits: MedicalCredits {
                    member: credits.member,
                    dependent1: credits.dependent1,
                    dependent_other: credits.dependent_other,
                },
            });
        }

        Ok(tables)
    }
}
