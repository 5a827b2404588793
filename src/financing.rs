//! Financing inputs and the down-payment/loan percentage balancer.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

/// Terms offered to the client, in years.
pub const TERM_CHOICES: [u32; 5] = [10, 15, 20, 25, 30];

/// Which side of the down-payment/loan split an input refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PercentageKind {
    DownPayment,
    Loan,
}

/// Parameters of the mortgage simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancingParams {
    /// Share of the price paid upfront, in percent. Always `100 - loan_pct`.
    pub down_payment_pct: Decimal,
    /// Share of the price financed by the bank, in percent.
    pub loan_pct: Decimal,
    /// Additional contribution, in percent. Recorded but not used by any calculation.
    pub extra_contribution_pct: Decimal,
    /// Loan term in years.
    pub term_years: u32,
    /// Annual nominal interest rate as a percentage (e.g., 6.5 for 6.5%).
    pub annual_rate_pct: Decimal,
}

impl Default for FinancingParams {
    fn default() -> Self {
        Self {
            down_payment_pct: dec!(20),
            loan_pct: dec!(80),
            extra_contribution_pct: dec!(0),
            term_years: 20,
            annual_rate_pct: dec!(6.5),
        }
    }
}

impl FinancingParams {
    /// Sets one side of the split from raw user input and the other side to its complement.
    ///
    /// The input is parsed leniently (see [`parse_number`]) and clamped to `[0, 100]`, so the two
    /// percentages always add up to 100. Returns `(down_payment_pct, loan_pct)`.
    pub fn adjust(&mut self, kind: PercentageKind, raw: &str) -> (Decimal, Decimal) {
        let (down_payment, loan) = balance(kind, parse_number(raw));
        self.down_payment_pct = down_payment;
        self.loan_pct = loan;
        debug!(?kind, raw, %down_payment, %loan, "Balanced financing split");
        (down_payment, loan)
    }

    /// Records the extra contribution percentage, clamped to `[0, 100]`.
    pub fn set_extra_contribution(&mut self, raw: &str) {
        self.extra_contribution_pct = clamp_percentage(parse_number(raw));
    }

    /// Sets the term from raw input. Fractions are truncated; invalid or negative input is 0.
    pub fn set_term_years(&mut self, raw: &str) {
        let years = parse_number(raw).trunc();
        self.term_years = if years.is_sign_negative() {
            0
        } else {
            years.to_u32().unwrap_or(u32::MAX)
        };
    }

    /// Sets the annual rate from raw input. Invalid input is 0.
    pub fn set_annual_rate(&mut self, raw: &str) {
        self.annual_rate_pct = parse_number(raw);
    }
}

fn clamp_percentage(value: Decimal) -> Decimal {
    value.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}

/// Clamps `value` to `[0, 100]` and returns the complementary `(down_payment_pct, loan_pct)` pair.
pub fn balance(kind: PercentageKind, value: Decimal) -> (Decimal, Decimal) {
    let value = clamp_percentage(value);
    let complement = Decimal::ONE_HUNDRED - value;
    match kind {
        PercentageKind::DownPayment => (value, complement),
        PercentageKind::Loan => (complement, value),
    }
}

/// Parses the leading number of `raw`, the way form inputs are read.
///
/// Leading whitespace is skipped, then an optional sign, digits and an optional fraction are
/// consumed; anything after that is ignored (`"12.5%"` is 12.5). Input without a leading number
/// is 0.
pub fn parse_number(raw: &str) -> Decimal {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let int_digits = &s[int_start..end];

    let mut frac_digits = "";
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        frac_digits = &s[frac_start..frac_end];
    }

    if int_digits.is_empty() && frac_digits.is_empty() {
        return Decimal::ZERO;
    }

    let sign = if s.starts_with('-') { "-" } else { "" };
    let int_digits = if int_digits.is_empty() { "0" } else { int_digits };
    let normalized = if frac_digits.is_empty() {
        format!("{sign}{int_digits}")
    } else {
        format!("{sign}{int_digits}.{frac_digits}")
    };
    Decimal::from_str(&normalized).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("20", dec!(20))]
    #[case("  35.5", dec!(35.5))]
    #[case("12.5%", dec!(12.5))]
    #[case(".5", dec!(0.5))]
    #[case("7.", dec!(7))]
    #[case("-3", dec!(-3))]
    #[case("+4", dec!(4))]
    #[case("abc", dec!(0))]
    #[case("", dec!(0))]
    #[case("-", dec!(0))]
    #[case("1.2.3", dec!(1.2))]
    fn test_parse_number(#[case] raw: &str, #[case] expected: Decimal) {
        assert_eq!(parse_number(raw), expected);
    }

    #[rstest]
    #[case(PercentageKind::DownPayment, "30", dec!(30), dec!(70))]
    #[case(PercentageKind::Loan, "90", dec!(10), dec!(90))]
    #[case(PercentageKind::DownPayment, "150", dec!(100), dec!(0))]
    #[case(PercentageKind::Loan, "-20", dec!(100), dec!(0))]
    #[case(PercentageKind::Loan, "not a number", dec!(100), dec!(0))]
    #[case(PercentageKind::DownPayment, "", dec!(0), dec!(100))]
    #[case(PercentageKind::DownPayment, "33.3", dec!(33.3), dec!(66.7))]
    fn test_adjust(
        #[case] kind: PercentageKind,
        #[case] raw: &str,
        #[case] down_payment: Decimal,
        #[case] loan: Decimal,
    ) {
        let mut params = FinancingParams::default();
        assert_eq!(params.adjust(kind, raw), (down_payment, loan));
        assert_eq!(params.down_payment_pct, down_payment);
        assert_eq!(params.loan_pct, loan);
        assert_eq!(params.down_payment_pct + params.loan_pct, dec!(100));
    }

    #[test]
    fn test_adjust_leaves_extra_contribution_alone() {
        let mut params = FinancingParams::default();
        params.set_extra_contribution("15");
        params.adjust(PercentageKind::Loan, "60");
        assert_eq!(params.extra_contribution_pct, dec!(15));
        assert_eq!(params.down_payment_pct, dec!(40));
    }

    #[rstest]
    #[case("25", 25)]
    #[case("12.9", 12)]
    #[case("-5", 0)]
    #[case("years", 0)]
    fn test_set_term_years(#[case] raw: &str, #[case] expected: u32) {
        let mut params = FinancingParams::default();
        params.set_term_years(raw);
        assert_eq!(params.term_years, expected);
    }

    #[test]
    fn test_set_annual_rate() {
        let mut params = FinancingParams::default();
        params.set_annual_rate("4.25");
        assert_eq!(params.annual_rate_pct, dec!(4.25));
        params.set_annual_rate("n/a");
        assert_eq!(params.annual_rate_pct, dec!(0));
    }

    #[test]
    fn test_defaults() {
        let params = FinancingParams::default();
        assert_eq!(params.down_payment_pct + params.loan_pct, dec!(100));
        assert_eq!(params.term_years, 20);
        assert!(TERM_CHOICES.contains(&params.term_years));
    }
}
