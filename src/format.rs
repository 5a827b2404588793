//! Display formatting of UF and CLP amounts.
//!
//! Both formats follow the Chilean convention: `.` groups thousands and `,` separates decimals.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Largest number of fraction digits shown for CLP amounts.
const CLP_MAX_FRACTION_DIGITS: u32 = 3;

/// Largest whole number every integer up to which an `f64` represents exactly (2^53).
const MAX_EXACT_F64: Decimal = dec!(9007199254740992);

/// Groups the integer digits of a non-negative whole number with `.` every three digits.
fn group_thousands(whole: Decimal) -> String {
    let whole = whole.trunc();
    match whole.to_f64() {
        Some(float) if whole <= MAX_EXACT_F64 => {
            format_num::format_num!(",.0f", float).replace(',', ".")
        }
        _ => group_digits(&whole.to_string()),
    }
}

/// Inserts `.` every three digits from the right of an unsigned digit string.
fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(digit);
    }
    out
}

fn round(value: Decimal, places: u32) -> Decimal {
    value.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats a UF amount: rounded to a whole number, thousands grouped with `.`.
///
/// # Examples
///
/// ```
/// use uf_quote::format::format_uf;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_uf(dec!(1234567)), "1.234.567");
/// assert_eq!(format_uf(dec!(999.4)), "999");
/// assert_eq!(format_uf(dec!(-4500.5)), "-4.501");
/// ```
pub fn format_uf(value: Decimal) -> String {
    let rounded = round(value, 0);
    let grouped = group_thousands(rounded.abs());
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Formats a CLP amount using the es-CL locale: `.` grouping, `,` decimals and at most three
/// fraction digits, with trailing zeros dropped.
///
/// # Examples
///
/// ```
/// use uf_quote::format::format_clp;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_clp(dec!(168750000)), "168.750.000");
/// assert_eq!(format_clp(dec!(1234.5)), "1.234,5");
/// ```
pub fn format_clp(value: Decimal) -> String {
    let rounded = round(value, CLP_MAX_FRACTION_DIGITS);
    let magnitude = rounded.abs();
    let whole = magnitude.trunc();
    let fraction = (magnitude - whole).normalize();

    let mut out = String::new();
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    out.push_str(&group_thousands(whole));
    if !fraction.is_zero() {
        // `fraction` renders as "0.xyz"
        let digits = fraction.to_string();
        out.push(',');
        out.push_str(digits.trim_start_matches("0."));
    }
    out
}

/// Formats a value with a fixed number of decimals and no grouping, rounding half away from
/// zero. Used for monthly payments (two places) and minimum income (one place).
pub fn format_fixed(value: Decimal, places: u32) -> String {
    let width = places as usize;
    format!("{:.width$}", round(value, places))
}

/// Formats a percentage without trailing zeros: `80`, `62.5`.
pub fn format_percent(value: Decimal) -> String {
    value.normalize().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(dec!(1234567), "1.234.567")]
    #[case(dec!(999), "999")]
    #[case(dec!(1000), "1.000")]
    #[case(dec!(0), "0")]
    #[case(dec!(999.5), "1.000")]
    #[case(dec!(4250.49), "4.250")]
    #[case(dec!(-1234567), "-1.234.567")]
    #[case(dec!(-12), "-12")]
    #[case(dec!(-0.4), "0")]
    #[case(dec!(100000000), "100.000.000")]
    #[case(dec!(9007199254740992), "9.007.199.254.740.992")]
    #[case(dec!(9007199254740993), "9.007.199.254.740.993")]
    #[case(dec!(12345678901234567), "12.345.678.901.234.567")]
    #[case(dec!(-12345678901234567.5), "-12.345.678.901.234.568")]
    #[case(Decimal::MAX, "79.228.162.514.264.337.593.543.950.335")]
    fn test_format_uf(#[case] value: Decimal, #[case] expected: &str) {
        assert_eq!(format_uf(value), expected);
    }

    #[rstest]
    #[case(dec!(1234567), "1.234.567")]
    #[case(dec!(999), "999")]
    #[case(dec!(1234.5), "1.234,5")]
    #[case(dec!(1234.5678), "1.234,568")]
    #[case(dec!(1234.5000), "1.234,5")]
    #[case(dec!(0.25), "0,25")]
    #[case(dec!(-98765.4), "-98.765,4")]
    #[case(dec!(98765432109876543), "98.765.432.109.876.543")]
    #[case(dec!(98765432109876543.25), "98.765.432.109.876.543,25")]
    fn test_format_clp(#[case] value: Decimal, #[case] expected: &str) {
        assert_eq!(format_clp(value), expected);
    }

    #[rstest]
    #[case(dec!(479.5), 2, "479.50")]
    #[case(dec!(8.3333333), 2, "8.33")]
    #[case(dec!(2.345), 2, "2.35")]
    #[case(dec!(1918.04), 1, "1918.0")]
    #[case(dec!(0), 2, "0.00")]
    fn test_format_fixed(#[case] value: Decimal, #[case] places: u32, #[case] expected: &str) {
        assert_eq!(format_fixed(value, places), expected);
    }

    #[rstest]
    #[case("1", "1")]
    #[case("123", "123")]
    #[case("1234", "1.234")]
    #[case("123456", "123.456")]
    #[case("1234567", "1.234.567")]
    fn test_group_digits(#[case] digits: &str, #[case] expected: &str) {
        assert_eq!(group_digits(digits), expected);
    }

    #[rstest]
    #[case(dec!(80), "80")]
    #[case(dec!(62.50), "62.5")]
    #[case(dec!(0), "0")]
    fn test_format_percent(#[case] value: Decimal, #[case] expected: &str) {
        assert_eq!(format_percent(value), expected);
    }
}
