mod age_band;
mod comparison_row;
mod deduction_breakdown;
mod optimization_point;
mod scenario;
mod tax_bracket;
mod tax_result;
mod tax_year_data;

pub use age_band::AgeBand;
pub use comparison_row::{ComparisonRow, DisplayMetric, ScenarioMetrics, UnknownDisplayMetric};
pub use deduction_breakdown::DeductionBreakdown;
pub use optimization_point::{OptimizationPoint, Recommendation};
pub use scenario::Scenario;
pub use tax_bracket::TaxBracket;
pub use tax_result::TaxResult;
pub use tax_year_data::{MedicalCredits, Rebates, TaxYearData};
