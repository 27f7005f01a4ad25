//! Shared arithmetic helpers for the tax calculations.

use rust_decimal::Decimal;

/// Rounds a money amount to cents using half-up rounding.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(29989.805)), dec!(29989.81));
/// assert_eq!(round_half_up(dec!(42678.264)), dec!(42678.26));
/// assert_eq!(round_half_up(dec!(-10.005)), dec!(-10.01)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the larger of two amounts.
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Clamps an amount at zero.
pub fn non_negative(value: Decimal) -> Decimal {
    max(value, Decimal::ZERO)
}

/// Expresses `part` as a percentage of `whole`, or zero when `whole` is not
/// positive.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::percentage_of;
///
/// assert_eq!(percentage_of(dec!(25000), dec!(100000)), dec!(25));
/// assert_eq!(percentage_of(dec!(100), dec!(0)), dec!(0));
/// ```
pub fn percentage_of(
    part: Decimal,
    whole: Decimal,
) -> Decimal {
    if whole > Decimal::ZERO {
        part / whole * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_half_up tests
    // =========================================================================

    #[test]
    fn round_half_up_rounds_down_below_midpoint() {
        assert_eq!(round_half_up(dec!(58632.004)), dec!(58632.00));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        assert_eq!(round_half_up(dec!(17235.125)), dec!(17235.13));
    }

    #[test]
    fn round_half_up_keeps_whole_rands() {
        assert_eq!(round_half_up(dec!(42678)), dec!(42678.00));
    }

    // =========================================================================
    // max / non_negative tests
    // =========================================================================

    #[test]
    fn max_returns_larger_value() {
        assert_eq!(max(dec!(100.00), dec!(200.00)), dec!(200.00));
        assert_eq!(max(dec!(200.00), dec!(100.00)), dec!(200.00));
    }

    #[test]
    fn non_negative_clamps_shortfall_to_zero() {
        assert_eq!(non_negative(dec!(-1885.20)), dec!(0));
    }

    #[test]
    fn non_negative_passes_positive_amounts_through() {
        assert_eq!(non_negative(dec!(41797.00)), dec!(41797.00));
    }

    // =========================================================================
    // percentage_of tests
    // =========================================================================

    #[test]
    fn percentage_of_scales_ratio_to_hundred() {
        assert_eq!(percentage_of(dec!(41797), dec!(300000)).round_dp(2), dec!(13.93));
    }

    #[test]
    fn percentage_of_zero_whole_is_zero() {
        assert_eq!(percentage_of(dec!(500), dec!(0)), dec!(0));
    }

    #[test]
    fn percentage_of_negative_whole_is_zero() {
        assert_eq!(percentage_of(dec!(500), dec!(-10)), dec!(0));
    }
}
