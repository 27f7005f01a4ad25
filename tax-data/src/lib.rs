//! Reference tax tables compiled into the binary.
//!
//! [`reference_tables`] parses the embedded CSV files on first use and
//! hands out the same validated [`InMemoryTaxTables`] afterwards.

mod loader;

use std::sync::OnceLock;

use tax_core::InMemoryTaxTables;
use tracing::info;

pub use loader::{
    BracketRecord, MedicalCreditRecord, RebateRecord, TableLoadError, TaxTableLoader,
};

const BRACKETS_CSV: &str = include_str!("../data/brackets.csv");
const REBATES_CSV: &str = include_str!("../data/rebates.csv");
const MEDICAL_CREDITS_CSV: &str = include_str!("../data/medical_credits.csv");

static REFERENCE_TABLES: OnceLock<Result<InMemoryTaxTables, TableLoadError>> = OnceLock::new();

/// Parses and validates the embedded tables without caching them.
pub fn load_embedded() -> Result<InMemoryTaxTables, TableLoadError> {
    let brackets = TaxTableLoader::parse_brackets(BRACKETS_CSV.as_bytes())?;
    let rebates = TaxTableLoader::parse_rebates(REBATES_CSV.as_bytes())?;
    let medical_credits = TaxTableLoader::parse_medical_credits(MEDICAL_CREDITS_CSV.as_bytes())?;

    TaxTableLoader::assemble(&brackets, &rebates, &medical_credits)
}

/// The shipped tax tables, loaded once per process.
///
/// # Errors
///
/// Returns the [`TableLoadError`] from the first load attempt if the
/// embedded data is malformed. The failure is cached like a success.
pub fn reference_tables() -> Result<&'static InMemoryTaxTables, TableLoadError> {
    REFERENCE_TABLES
        .get_or_init(|| {
            let result = load_embedded();
            if let Ok(tables) = &result {
                info!(years = tables.len(), "loaded reference tax tables");
            }
            result
        })
        .as_ref()
        .map_err(Clone::clone)
}
