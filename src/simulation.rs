//! Fixed-rate mortgage simulation.

use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Largest share of the monthly income the payment may take.
pub const DEBT_TO_INCOME_RATIO: Decimal = dec!(0.25);

/// Contains the results of a mortgage simulation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// The portion of the price covered by the loan.
    pub financed_amount: Decimal,
    /// The fixed monthly payment amount.
    pub monthly_payment: Decimal,
    /// Total paid minus the financed amount.
    pub total_interest: Decimal,
    /// The total amount paid over the lifetime of the loan.
    pub total_payments: Decimal,
    /// Monthly income needed for the payment to stay within [`DEBT_TO_INCOME_RATIO`].
    pub minimum_income: Decimal,
}

/// Simulates a fixed-rate amortized loan over a share of `total`.
///
/// The payment follows the Price table formula: PMT = P * [i(1 + i)^n] / [(1 + i)^n – 1]
///
/// # Arguments
///
/// * `total` - The price being financed, before applying `loan_pct`.
/// * `loan_pct` - The share of `total` covered by the loan, as a percentage.
/// * `annual_rate_pct` - The annual nominal interest rate as a percentage (e.g., 6 for 6%).
/// * `term_years` - The loan term in years.
///
/// The payment is zero when the financed amount is not positive or the term is zero. A zero
/// rate divides the financed amount evenly across the payments.
pub fn simulate(
    total: Decimal,
    loan_pct: Decimal,
    annual_rate_pct: Decimal,
    term_years: u32,
) -> SimulationResult {
    let financed_amount = total.saturating_mul(loan_pct / Decimal::ONE_HUNDRED);
    let monthly_rate = annual_rate_pct / Decimal::ONE_HUNDRED / dec!(12);
    let total_months = term_years.saturating_mul(12);

    let monthly_payment = monthly_payment(financed_amount, monthly_rate, total_months);
    let total_payments = monthly_payment.saturating_mul(Decimal::from(total_months));
    let total_interest = total_payments.saturating_sub(financed_amount);
    // Dividing by the ratio overflows only where the payment is already near `Decimal::MAX`.
    let minimum_income = monthly_payment
        .checked_div(DEBT_TO_INCOME_RATIO)
        .unwrap_or(Decimal::MAX);

    let result = SimulationResult {
        financed_amount,
        monthly_payment,
        total_interest,
        total_payments,
        minimum_income,
    };
    trace!(%total, %loan_pct, %annual_rate_pct, term_years, ?result, "Simulated mortgage");
    result
}

/// Calculates the fixed monthly payment of an amortized loan.
///
/// # Arguments
///
/// * `financed_amount` - The principal loan amount.
/// * `monthly_rate` - The monthly interest rate as a decimal (not percentage).
/// * `total_months` - The total number of payments.
pub fn monthly_payment(financed_amount: Decimal, monthly_rate: Decimal, total_months: u32) -> Decimal {
    if financed_amount <= Decimal::ZERO || total_months == 0 {
        return Decimal::ZERO;
    }
    if monthly_rate.is_zero() {
        return financed_amount / Decimal::from(total_months);
    }

    // PMT = P * i * (1 + i)^n / ((1 + i)^n - 1)
    let payment = Decimal::ONE
        .checked_add(monthly_rate)
        .and_then(|base| base.checked_powu(total_months.into()))
        .filter(|growth| *growth != Decimal::ONE)
        .and_then(|growth| {
            let ratio = growth.checked_div(growth.checked_sub(Decimal::ONE)?)?;
            financed_amount.checked_mul(monthly_rate)?.checked_mul(ratio)
        });

    // When the growth factor cannot be represented the payment tends to the interest alone.
    payment.unwrap_or_else(|| financed_amount.saturating_mul(monthly_rate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn assert_close(actual: Decimal, expected: Decimal, tolerance: Decimal) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_simulate_standard_case() {
        let result = simulate(dec!(100000), dec!(80), dec!(6), 20);

        assert_eq!(result.financed_amount, dec!(80000));
        // 80000 * 0.005 * 1.005^240 / (1.005^240 - 1)
        assert_close(result.monthly_payment, dec!(573.1448), dec!(0.0001));
        assert_close(result.total_payments, result.monthly_payment * dec!(240), dec!(0.000001));
        assert_close(result.total_interest, dec!(57554.76), dec!(0.01));
        assert_close(result.minimum_income, result.monthly_payment * dec!(4), dec!(0.000001));
    }

    #[test]
    fn test_simulate_zero_rate() {
        let result = simulate(dec!(1000), dec!(100), dec!(0), 10);

        assert_close(result.monthly_payment, dec!(8.3333333333), dec!(0.0000001));
        assert_close(result.total_interest, dec!(0), dec!(0.000001));
        assert_close(result.total_payments, dec!(1000), dec!(0.000001));
    }

    #[rstest]
    #[case(dec!(0), dec!(80))]
    #[case(dec!(5000), dec!(0))]
    #[case(dec!(-5000), dec!(80))]
    fn test_simulate_nothing_financed(#[case] total: Decimal, #[case] loan_pct: Decimal) {
        let result = simulate(total, loan_pct, dec!(6.5), 20);

        assert_eq!(result.monthly_payment, dec!(0));
        assert_eq!(result.total_payments, dec!(0));
        assert_eq!(result.minimum_income, dec!(0));
        assert_eq!(result.total_interest, -result.financed_amount);
    }

    #[test]
    fn test_simulate_zero_term() {
        let result = simulate(dec!(5000), dec!(80), dec!(6.5), 0);
        assert_eq!(result.financed_amount, dec!(4000));
        assert_eq!(result.monthly_payment, dec!(0));
    }

    #[test]
    fn test_simulate_huge_rate_does_not_overflow() {
        let result = simulate(dec!(5000), dec!(100), dec!(1000000), 30);
        assert_close(result.monthly_payment, dec!(4166666.6666), dec!(0.001));

        // The payment alone is 3.75e28; every total built from it saturates.
        let result = simulate(dec!(5000), dec!(100), dec!(9000000000000000000000000000), 20);
        assert_eq!(result.monthly_payment, dec!(37500000000000000000000000000));
        assert_eq!(result.total_payments, Decimal::MAX);
        assert_eq!(result.total_interest, Decimal::MAX - dec!(5000));
        assert_eq!(result.minimum_income, Decimal::MAX);
    }

    #[test]
    fn test_simulate_saturates_financed_amount() {
        let result = simulate(Decimal::MAX, dec!(200), dec!(6.5), 20);
        assert_eq!(result.financed_amount, Decimal::MAX);
        assert!(result.monthly_payment > Decimal::ZERO);
    }

    #[test]
    fn test_monthly_payment_matches_price_table() {
        // 12000 at 1% monthly over 12 months
        assert_eq!(monthly_payment(dec!(12000), dec!(0.01), 12).round_dp(2), dec!(1066.19));
    }
}
