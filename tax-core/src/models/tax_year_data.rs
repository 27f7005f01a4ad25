use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AgeBand, TaxBracket};

/// Age-dependent rebates subtracted from tax after the bracket schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rebates {
    pub primary: Decimal,
    pub secondary: Decimal,
    pub tertiary: Decimal,
}

impl Rebates {
    /// Total rebate for a taxpayer in the given age band.
    ///
    /// Everyone receives the primary rebate; the secondary applies from 65
    /// and the tertiary from 75.
    pub fn total_for(
        &self,
        age_band: AgeBand,
    ) -> Decimal {
        match age_band {
            AgeBand::Under65 => self.primary,
            AgeBand::From65 => self.primary + self.secondary,
            AgeBand::From75 => self.primary + self.secondary + self.tertiary,
        }
    }
}

/// Monthly medical scheme fees tax credits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalCredits {
    pub member: Decimal,
    pub dependent1: Decimal,
    pub dependent_other: Decimal,
}

/// Reference data for a single tax year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxYearData {
    /// Year key, e.g. `2025-26`.
    pub tax_year: String,
    pub brackets: Vec<TaxBracket>,
    pub rebates: Rebates,
    pub medical_credits: MedicalCredits,
}
