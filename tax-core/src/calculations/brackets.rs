//! Progressive bracket schedule lookups.
//!
//! A schedule is an ascending list of [`TaxBracket`]s covering `[0, ∞)`.
//! Bracket boundaries are whole rands: the `max_income` of one bracket and the
//! `min_income` of the next are consecutive, so the boundary income belongs to
//! exactly one bracket.
//!
//! | Bracket | Tax |
//! |---------|-----|
//! | first   | `taxable_income × rate` |
//! | other   | `base_tax + (taxable_income - min_income + 1) × rate` |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::TaxBracket;
//! use tax_core::calculations::BracketSchedule;
//!
//! let brackets = vec![
//!     TaxBracket {
//!         min_income: dec!(0),
//!         max_income: Some(dec!(237100)),
//!         tax_rate: dec!(0.18),
//!         base_tax: dec!(0),
//!     },
//!     TaxBracket {
//!         min_income: dec!(237101),
//!         max_income: None,
//!         tax_rate: dec!(0.26),
//!         base_tax: dec!(42678),
//!     },
//! ];
//!
//! let schedule = BracketSchedule::new(&brackets);
//!
//! assert_eq!(schedule.tax_before_rebates(dec!(237100)).unwrap(), dec!(42678.00));
//! assert_eq!(schedule.tax_before_rebates(dec!(237101)).unwrap(), dec!(42678.26));
//! assert_eq!(schedule.marginal_rate(dec!(300000)).unwrap(), dec!(0.26));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

use crate::TaxBracket;
use crate::calculations::common::round_half_up;

/// Errors raised for malformed bracket schedules.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BracketError {
    /// The schedule has no brackets at all.
    #[error("no tax brackets provided")]
    NoTaxBrackets,

    /// The lowest bracket does not start at zero.
    #[error("first bracket must start at 0, got {0}")]
    FirstBracketNotAtZero(Decimal),

    /// A bracket's rate is outside (0, 1].
    #[error("bracket {index} has rate {rate}, expected a fraction in (0, 1]")]
    InvalidRate { index: usize, rate: Decimal },

    /// A bracket's upper bound lies below its lower bound.
    #[error("bracket {index} ends before it starts")]
    EmptyBracket { index: usize },

    /// A bracket other than the last one has no upper bound.
    #[error("bracket {index} is open-ended but is not the last bracket")]
    OpenBracketNotLast { index: usize },

    /// The last bracket has an upper bound, so high incomes are not covered.
    #[error("last bracket must be open-ended")]
    MissingOpenBracket,

    /// A bracket does not start one rand above the previous bracket's maximum.
    #[error("bracket {index} starts at {found}, expected {expected}")]
    NotContiguous {
        index: usize,
        expected: Decimal,
        found: Decimal,
    },

    /// A bracket's base tax disagrees with the tax owed at the top of the
    /// bracket below it.
    #[error("bracket {index} has base tax {found}, lower brackets give {expected}")]
    BaseTaxMismatch {
        index: usize,
        expected: Decimal,
        found: Decimal,
    },
}

/// Read-only view over an ascending bracket schedule.
#[derive(Debug, Clone, Copy)]
pub struct BracketSchedule<'a> {
    brackets: &'a [TaxBracket],
}

impl<'a> BracketSchedule<'a> {
    /// Wraps a bracket list. Brackets should be sorted by `min_income` and
    /// satisfy [`BracketSchedule::validate`].
    pub fn new(brackets: &'a [TaxBracket]) -> Self {
        Self { brackets }
    }

    /// Calculates tax owed on `taxable_income` before any rebates or credits.
    ///
    /// Zero or negative income owes nothing. Otherwise the bracket containing
    /// the income is located directly; incomes above every finite bracket of
    /// a schedule without an open top bracket use the last bracket.
    ///
    /// # Errors
    ///
    /// Returns [`BracketError::NoTaxBrackets`] for an empty schedule.
    pub fn tax_before_rebates(
        &self,
        taxable_income: Decimal,
    ) -> Result<Decimal, BracketError> {
        let (index, bracket) = self.containing_bracket(taxable_income)?;

        if taxable_income <= Decimal::ZERO {
            return Ok(Decimal::ZERO);
        }

        let tax = if index == 0 {
            let capped = bracket
                .max_income
                .map_or(taxable_income, |max| taxable_income.min(max));
            capped * bracket.tax_rate
        } else {
            let marginal_income = taxable_income - bracket.min_income + Decimal::ONE;
            bracket.base_tax + marginal_income * bracket.tax_rate
        };

        Ok(round_half_up(tax))
    }

    /// Returns the rate of the bracket whose `[min, max]` range contains
    /// `income`, as a fraction.
    ///
    /// Incomes that match no bracket (negative, or between two whole-rand
    /// boundaries) fall back to the highest bracket's rate.
    ///
    /// # Errors
    ///
    /// Returns [`BracketError::NoTaxBrackets`] for an empty schedule.
    pub fn marginal_rate(
        &self,
        income: Decimal,
    ) -> Result<Decimal, BracketError> {
        let last = self.brackets.last().ok_or(BracketError::NoTaxBrackets)?;

        let rate = self
            .brackets
            .iter()
            .find(|b| b.contains(income))
            .unwrap_or(last)
            .tax_rate;

        Ok(rate)
    }

    /// Checks the schedule invariants: starts at zero, contiguous whole-rand
    /// boundaries, rates in (0, 1], a single open top bracket, and base taxes
    /// that match the tax owed at the top of each lower bracket.
    ///
    /// # Errors
    ///
    /// Returns the first [`BracketError`] found, scanning from the bottom.
    pub fn validate(&self) -> Result<(), BracketError> {
        let first = self.brackets.first().ok_or(BracketError::NoTaxBrackets)?;
        if first.min_income != Decimal::ZERO {
            return Err(BracketError::FirstBracketNotAtZero(first.min_income));
        }

        for (index, bracket) in self.brackets.iter().enumerate() {
            if bracket.tax_rate <= Decimal::ZERO || bracket.tax_rate > Decimal::ONE {
                return Err(BracketError::InvalidRate {
                    index,
                    rate: bracket.tax_rate,
                });
            }

            if bracket.max_income.is_some_and(|max| max < bracket.min_income) {
                return Err(BracketError::EmptyBracket { index });
            }

            if index == 0 {
                continue;
            }

            let previous = &self.brackets[index - 1];
            let previous_max = previous
                .max_income
                .ok_or(BracketError::OpenBracketNotLast { index: index - 1 })?;

            let expected_min = previous_max + Decimal::ONE;
            if bracket.min_income != expected_min {
                return Err(BracketError::NotContiguous {
                    index,
                    expected: expected_min,
                    found: bracket.min_income,
                });
            }

            let expected_base = BracketSchedule::new(&self.brackets[..index])
                .tax_before_rebates(previous_max)?;
            if bracket.base_tax != expected_base {
                return Err(BracketError::BaseTaxMismatch {
                    index,
                    expected: expected_base,
                    found: bracket.base_tax,
                });
            }
        }

        match self.brackets.last() {
            Some(last) if last.max_income.is_none() => Ok(()),
            _ => Err(BracketError::MissingOpenBracket),
        }
    }

    /// Finds the first bracket whose upper bound is at or above `income`,
    /// falling back to the last bracket.
    fn containing_bracket(
        &self,
        income: Decimal,
    ) -> Result<(usize, &'a TaxBracket), BracketError> {
        let brackets = self.brackets;

        brackets
            .iter()
            .enumerate()
            .find(|(_, b)| b.max_income.is_none_or(|max| income <= max))
            .or_else(|| brackets.iter().enumerate().last())
            .ok_or(BracketError::NoTaxBrackets)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::{prop_assert, proptest};
    use rust_decimal_macros::dec;

    use super::*;

    fn bracket(
        min_income: Decimal,
        max_income: Option<Decimal>,
        tax_rate: Decimal,
        base_tax: Decimal,
    ) -> TaxBracket {
        TaxBracket {
            min_income,
            max_income,
            tax_rate,
            base_tax,
        }
    }

    fn test_brackets() -> Vec<TaxBracket> {
        vec![
            bracket(dec!(0), Some(dec!(237100)), dec!(0.18), dec!(0)),
            bracket(dec!(237101), Some(dec!(370500)), dec!(0.26), dec!(42678)),
            bracket(dec!(370501), Some(dec!(512800)), dec!(0.31), dec!(77362)),
            bracket(dec!(512801), Some(dec!(673000)), dec!(0.36), dec!(121475)),
            bracket(dec!(673001), Some(dec!(857900)), dec!(0.39), dec!(179147)),
            bracket(dec!(857901), Some(dec!(1817000)), dec!(0.41), dec!(251258)),
            bracket(dec!(1817001), None, dec!(0.45), dec!(644489)),
        ]
    }

    // =========================================================================
    // tax_before_rebates tests
    // =========================================================================

    #[test]
    fn tax_is_zero_for_zero_income() {
        let brackets = test_brackets();
        let schedule = BracketSchedule::new(&brackets);

        assert_eq!(schedule.tax_before_rebates(dec!(0)), Ok(dec!(0)));
    }

    #[test]
    fn tax_is_zero_for_negative_income() {
        let brackets = test_brackets();
        let schedule = BracketSchedule::new(&brackets);

        assert_eq!(schedule.tax_before_rebates(dec!(-5000)), Ok(dec!(0)));
    }

    #[test]
    fn tax_first_bracket_applies_rate_directly() {
        let brackets = test_brackets();
        let schedule = BracketSchedule::new(&brackets);

        // 166610 * 0.18 = 29989.80
        assert_eq!(schedule.tax_before_rebates(dec!(166610)), Ok(dec!(29989.80)));
    }

    #[test]
    fn tax_at_top_of_first_bracket() {
        let brackets = test_brackets();
        let schedule = BracketSchedule::new(&brackets);

        assert_eq!(schedule.tax_before_rebates(dec!(237100)), Ok(dec!(42678.00)));
    }

    #[test]
    fn tax_one_rand_into_second_bracket() {
        let brackets = test_brackets();
        let schedule = BracketSchedule::new(&brackets);

        // 42678 + (237101 - 237101 + 1) * 0.26
        assert_eq!(schedule.tax_before_rebates(dec!(237101)), Ok(dec!(42678.26)));
    }

    #[test]
    fn tax_second_bracket() {
        let brackets = test_brackets();
        let schedule = BracketSchedule::new(&brackets);

        // 42678 + (300000 - 237101 + 1) * 0.26 = 42678 + 16354
        assert_eq!(schedule.tax_before_rebates(dec!(300000)), Ok(dec!(59032.00)));
    }

    #[test]
    fn tax_fifth_bracket() {
        let brackets = test_brackets();
        let schedule = BracketSchedule::new(&brackets);

        // 179147 + (710360 - 673001 + 1) * 0.39 = 179147 + 14570.40
        assert_eq!(schedule.tax_before_rebates(dec!(710360)), Ok(dec!(193717.40)));
    }

    #[test]
    fn tax_top_bracket() {
        let brackets = test_brackets();
        let schedule = BracketSchedule::new(&brackets);

        // 644489 + (3000000 - 1817001 + 1) * 0.45 = 644489 + 532350
        assert_eq!(schedule.tax_before_rebates(dec!(3000000)), Ok(dec!(1176839.00)));
    }

    #[test]
    fn tax_on_fractional_income_between_boundaries_uses_upper_bracket() {
        let brackets = test_brackets();
        let schedule = BracketSchedule::new(&brackets);

        // 42678 + (237100.5 - 237101 + 1) * 0.26 = 42678.13
        assert_eq!(schedule.tax_before_rebates(dec!(237100.5)), Ok(dec!(42678.13)));
    }

    #[test]
    fn tax_above_finite_schedule_uses_last_bracket() {
        let brackets = vec![
            bracket(dec!(0), Some(dec!(1000)), dec!(0.10), dec!(0)),
            bracket(dec!(1001), Some(dec!(2000)), dec!(0.20), dec!(100)),
        ];
        let schedule = BracketSchedule::new(&brackets);

        // 100 + (5000 - 1001 + 1) * 0.20
        assert_eq!(schedule.tax_before_rebates(dec!(5000)), Ok(dec!(900.00)));
    }

    #[test]
    fn tax_single_finite_bracket_caps_at_max() {
        let brackets = vec![bracket(dec!(0), Some(dec!(1000)), dec!(0.10), dec!(0))];
        let schedule = BracketSchedule::new(&brackets);

        assert_eq!(schedule.tax_before_rebates(dec!(5000)), Ok(dec!(100.00)));
    }

    #[test]
    fn tax_with_empty_schedule_is_an_error() {
        let brackets: Vec<TaxBracket> = vec![];
        let schedule = BracketSchedule::new(&brackets);

        assert_eq!(
            schedule.tax_before_rebates(dec!(100000)),
            Err(BracketError::NoTaxBrackets)
        );
    }

    // =========================================================================
    // marginal_rate tests
    // =========================================================================

    #[test]
    fn marginal_rate_matches_containing_bracket() {
        let brackets = test_brackets();
        let schedule = BracketSchedule::new(&brackets);

        assert_eq!(schedule.marginal_rate(dec!(0)), Ok(dec!(0.18)));
        assert_eq!(schedule.marginal_rate(dec!(237100)), Ok(dec!(0.18)));
        assert_eq!(schedule.marginal_rate(dec!(237101)), Ok(dec!(0.26)));
        assert_eq!(schedule.marginal_rate(dec!(600000)), Ok(dec!(0.36)));
        assert_eq!(schedule.marginal_rate(dec!(2500000)), Ok(dec!(0.45)));
    }

    #[test]
    fn marginal_rate_falls_back_to_top_rate_for_negative_income() {
        let brackets = test_brackets();
        let schedule = BracketSchedule::new(&brackets);

        assert_eq!(schedule.marginal_rate(dec!(-1)), Ok(dec!(0.45)));
    }

    #[test]
    fn marginal_rate_falls_back_to_top_rate_in_fractional_gap() {
        let brackets = test_brackets();
        let schedule = BracketSchedule::new(&brackets);

        assert_eq!(schedule.marginal_rate(dec!(237100.5)), Ok(dec!(0.45)));
    }

    #[test]
    fn marginal_rate_with_empty_schedule_is_an_error() {
        let brackets: Vec<TaxBracket> = vec![];
        let schedule = BracketSchedule::new(&brackets);

        assert_eq!(schedule.marginal_rate(dec!(1)), Err(BracketError::NoTaxBrackets));
    }

    // =========================================================================
    // validate tests
    // =========================================================================

    #[test]
    fn validate_accepts_reference_schedule() {
        let brackets = test_brackets();

        assert_eq!(BracketSchedule::new(&brackets).validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_empty_schedule() {
        let brackets: Vec<TaxBracket> = vec![];

        assert_eq!(
            BracketSchedule::new(&brackets).validate(),
            Err(BracketError::NoTaxBrackets)
        );
    }

    #[test]
    fn validate_rejects_schedule_not_starting_at_zero() {
        let mut brackets = test_brackets();
        brackets[0].min_income = dec!(1);

        assert_eq!(
            BracketSchedule::new(&brackets).validate(),
            Err(BracketError::FirstBracketNotAtZero(dec!(1)))
        );
    }

    #[test]
    fn validate_rejects_gap_between_brackets() {
        let mut brackets = test_brackets();
        brackets[2].min_income = dec!(370600);

        assert_eq!(
            BracketSchedule::new(&brackets).validate(),
            Err(BracketError::NotContiguous {
                index: 2,
                expected: dec!(370501),
                found: dec!(370600),
            })
        );
    }

    #[test]
    fn validate_rejects_inconsistent_base_tax() {
        let mut brackets = test_brackets();
        brackets[3].base_tax = dec!(121000);

        assert_eq!(
            BracketSchedule::new(&brackets).validate(),
            Err(BracketError::BaseTaxMismatch {
                index: 3,
                expected: dec!(121475),
                found: dec!(121000),
            })
        );
    }

    #[test]
    fn validate_rejects_zero_rate() {
        let mut brackets = test_brackets();
        brackets[1].tax_rate = dec!(0);

        assert_eq!(
            BracketSchedule::new(&brackets).validate(),
            Err(BracketError::InvalidRate {
                index: 1,
                rate: dec!(0),
            })
        );
    }

    #[test]
    fn validate_rejects_open_bracket_in_the_middle() {
        let mut brackets = test_brackets();
        brackets[4].max_income = None;

        assert_eq!(
            BracketSchedule::new(&brackets).validate(),
            Err(BracketError::OpenBracketNotLast { index: 4 })
        );
    }

    #[test]
    fn validate_rejects_closed_top_bracket() {
        let mut brackets = test_brackets();
        brackets[6].max_income = Some(dec!(5000000));

        assert_eq!(
            BracketSchedule::new(&brackets).validate(),
            Err(BracketError::MissingOpenBracket)
        );
    }

    // =========================================================================
    // properties
    // =========================================================================

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(200))]

        #[test]
        fn prop_tax_is_non_decreasing(a in 0u64..4_000_000, b in 0u64..4_000_000) {
            let brackets = test_brackets();
            let schedule = BracketSchedule::new(&brackets);
            let (low, high) = if a <= b { (a, b) } else { (b, a) };

            let low_tax = schedule.tax_before_rebates(Decimal::from(low)).unwrap();
            let high_tax = schedule.tax_before_rebates(Decimal::from(high)).unwrap();

            prop_assert!(low_tax <= high_tax);
        }

        #[test]
        fn prop_next_rand_costs_at_most_the_marginal_rate(income in 0u64..4_000_000) {
            let brackets = test_brackets();
            let schedule = BracketSchedule::new(&brackets);
            let income = Decimal::from(income);

            let tax = schedule.tax_before_rebates(income).unwrap();
            let next = schedule.tax_before_rebates(income + Decimal::ONE).unwrap();
            let rate = schedule.marginal_rate(income + Decimal::ONE).unwrap();

            prop_assert!(next - tax <= rate);
        }
    }
}
