use thiserror::Error;

use crate::models::TaxYearData;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Tax year '{0}' not found")]
    NotFound(String),
}

/// Read-only source of per-year reference tables.
///
/// Implementations are shared across threads for the lifetime of the
/// process, so lookups hand out borrowed data.
pub trait TaxTableRepository: Send + Sync {
    fn get_tax_year_data(
        &self,
        tax_year: &str,
    ) -> Result<&TaxYearData, RepositoryError>;

    /// Year keys in ascending order.
    fn list_tax_years(&self) -> Vec<&str>;
}
