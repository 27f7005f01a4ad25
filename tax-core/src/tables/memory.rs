use std::collections::BTreeMap;

use super::repository::{RepositoryError, TaxTableRepository};
use crate::models::TaxYearData;

/// [`TaxTableRepository`] backed by a map of year key to tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryTaxTables {
    years: BTreeMap<String, TaxYearData>,
}

impl InMemoryTaxTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the tables for `data.tax_year`, returning any tables it replaced.
    pub fn insert(
        &mut self,
        data: TaxYearData,
    ) -> Option<TaxYearData> {
        self.years.insert(data.tax_year.clone(), data)
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

impl FromIterator<TaxYearData> for InMemoryTaxTables {
    fn from_iter<I: IntoIterator<Item = TaxYearData>>(iter: I) -> Self {
        let mut tables = Self::new();
        for data in iter {
            tables.insert(data);
        }
        tables
    }
}

impl TaxTableRepository for InMemoryTaxTables {
    fn get_tax_year_data(
        &self,
        tax_year: &str,
    ) -> Result<&TaxYearData, RepositoryError> {
        self.years
            .get(tax_year)
            .ok_or_else(|| RepositoryError::NotFound(tax_year.to_string()))
    }

    fn list_tax_years(&self) -> Vec<&str> {
        self.years.keys().map(String::as_str).collect()
    }
}
