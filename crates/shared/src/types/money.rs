//! Money helpers with decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations. All monetary
//! values in the system are `rust_decimal::Decimal`, normalized to two
//! decimal places (currency-agnostic minor units).

use rust_decimal::Decimal;

/// Number of decimal places monetary amounts carry.
pub const MONEY_SCALE: u32 = 2;

/// Normalizes a monetary amount to [`MONEY_SCALE`] decimal places using
/// banker's rounding.
#[must_use]
pub fn normalize(amount: Decimal) -> Decimal {
    amount.round_dp(MONEY_SCALE)
}

/// Returns true if the amount is a usable monetary value: strictly positive
/// and no finer than [`MONEY_SCALE`] decimal places.
#[must_use]
pub fn is_valid_amount(amount: Decimal) -> bool {
    amount > Decimal::ZERO && normalize(amount) == amount
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(dec!(10.005), dec!(10.00))] // banker's rounding, ties to even
    #[case(dec!(10.015), dec!(10.02))]
    #[case(dec!(10.1), dec!(10.1))]
    #[case(dec!(-1.999), dec!(-2.00))]
    fn test_normalize(#[case] input: Decimal, #[case] expected: Decimal) {
        assert_eq!(normalize(input), expected);
    }

    #[rstest]
    #[case(dec!(50), true)]
    #[case(dec!(0.01), true)]
    #[case(dec!(0), false)]
    #[case(dec!(-5), false)]
    #[case(dec!(0.001), false)]
    fn test_is_valid_amount(#[case] input: Decimal, #[case] expected: bool) {
        assert_eq!(is_valid_amount(input), expected);
    }
}
