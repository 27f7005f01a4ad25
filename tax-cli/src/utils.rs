use rust_decimal::{Decimal, RoundingStrategy};
use tax_core::calculations::report::INCOME_CEILING_PRESETS;
use thiserror::Error;

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid amount '{input}': {reason}")]
pub struct ParseDecimalError {
    input: String,
    reason: String,
}

/// Trims whitespace and removes commas (thousands separator).
fn normalize_decimal_input(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Parses an amount such as `1,500,000` or `250000.50`.
///
/// A leading `R` is accepted. Empty input is an error since every amount
/// the CLI takes is required.
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let normalized = normalize_decimal_input(s);
    let digits = normalized.strip_prefix('R').unwrap_or(&normalized);
    if digits.is_empty() {
        return Err(ParseDecimalError {
            input: s.to_string(),
            reason: "empty amount".to_string(),
        });
    }
    digits.parse().map_err(|e: rust_decimal::Error| {
        tracing::warn!(input = %s, "invalid amount: {}", e);
        ParseDecimalError {
            input: s.to_string(),
            reason: e.to_string(),
        }
    })
}

/// Formats a rand amount with thousands separators, e.g. `R1,234,567.89`.
///
/// Whole amounts are printed without cents.
pub fn format_rand(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    let abs = rounded.abs();

    let whole = abs.trunc();
    let cents = ((abs - whole) * Decimal::ONE_HUNDRED).trunc();

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if cents.is_zero() {
        format!("{sign}R{grouped}")
    } else {
        format!("{sign}R{grouped}.{:0>2}", cents.to_string())
    }
}

/// Formats a percentage with two decimals, e.g. `13.93%`.
pub fn format_percent(rate: Decimal) -> String {
    format!(
        "{:.2}%",
        rate.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

/// Help text listing the income ceilings offered for `--max-income`.
pub fn ceiling_presets_help() -> String {
    let presets: Vec<String> = INCOME_CEILING_PRESETS
        .iter()
        .map(|ceiling| format_rand(*ceiling))
        .collect();
    format!("Suggested --max-income values: {}", presets.join(", "))
}
