use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One band of a progressive rate schedule.
///
/// `max_income` is `None` for the open top bracket. `base_tax` is the
/// cumulative tax owed on all income below `min_income`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min_income: Decimal,
    pub max_income: Option<Decimal>,
    pub tax_rate: Decimal,
    pub base_tax: Decimal,
}

impl TaxBracket {
    /// Returns true when `income` falls within `[min_income, max_income]`.
    pub fn contains(
        &self,
        income: Decimal,
    ) -> bool {
        income >= self.min_income && self.max_income.is_none_or(|max| income <= max)
    }
}
