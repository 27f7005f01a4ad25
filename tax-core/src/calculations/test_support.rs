use rust_decimal_macros::dec;

use crate::{InMemoryTaxTables, MedicalCredits, Rebates, TaxBracket, TaxYearData};

fn bracket(
    min_income: rust_decimal::Decimal,
    max_income: Option<rust_decimal::Decimal>,
    tax_rate: rust_decimal::Decimal,
    base_tax: rust_decimal::Decimal,
) -> TaxBracket {
    TaxBracket {
        min_income,
        max_income,
        tax_rate,
        base_tax,
    }
}

pub(crate) fn test_year() -> TaxYearData {
    TaxYearData {
        tax_year: "2025-26".to_string(),
        brackets: vec![
            bracket(dec!(0), Some(dec!(237100)), dec!(0.18), dec!(0)),
            bracket(dec!(237101), Some(dec!(370500)), dec!(0.26), dec!(42678)),
            bracket(dec!(370501), Some(dec!(512800)), dec!(0.31), dec!(77362)),
            bracket(dec!(512801), Some(dec!(673000)), dec!(0.36), dec!(121475)),
            bracket(dec!(673001), Some(dec!(857900)), dec!(0.39), dec!(179147)),
            bracket(dec!(857901), Some(dec!(1817000)), dec!(0.41), dec!(251258)),
            bracket(dec!(1817001), None, dec!(0.45), dec!(644489)),
        ],
        rebates: Rebates {
            primary: dec!(17235),
            secondary: dec!(9444),
            tertiary: dec!(3145),
        },
        medical_credits: MedicalCredits {
            member: dec!(364),
            dependent1: dec!(364),
            dependent_other: dec!(246),
        },
    }
}

pub(crate) fn test_tables() -> InMemoryTaxTables {
    [test_year()].into_iter().collect()
}
