//! Property-based tests for wallet arithmetic.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::error::WalletError;
use super::service::WalletService;

/// Strategy for valid mutation amounts (0.01 to 10,000.00, two decimals).
fn valid_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for non-negative balances (0.00 to 100,000.00).
fn balance() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

proptest! {
    #[test]
    fn credit_adds_exactly(start in balance(), amount in valid_amount()) {
        let after = WalletService::apply_credit(start, amount).unwrap();
        prop_assert_eq!(after - start, amount);
    }

    #[test]
    fn debit_fails_iff_balance_short(start in balance(), amount in valid_amount()) {
        match WalletService::apply_debit(start, amount) {
            Ok(after) => {
                prop_assert!(start >= amount);
                prop_assert_eq!(start - after, amount);
                prop_assert!(after >= Decimal::ZERO);
            }
            Err(WalletError::InsufficientFunds { balance, requested }) => {
                prop_assert!(start < amount);
                prop_assert_eq!(balance, start);
                prop_assert_eq!(requested, amount);
            }
            Err(other) => prop_assert!(false, "unexpected error: {other}"),
        }
    }

    #[test]
    fn credit_then_debit_round_trips(start in balance(), amount in valid_amount()) {
        let credited = WalletService::apply_credit(start, amount).unwrap();
        let back = WalletService::apply_debit(credited, amount).unwrap();
        prop_assert_eq!(back, start);
    }

    #[test]
    fn non_positive_amounts_rejected(start in balance(), cents in -1_000_000i64..=0) {
        let amount = Decimal::new(cents, 2);
        prop_assert!(matches!(
            WalletService::apply_credit(start, amount),
            Err(WalletError::InvalidAmount(_))
        ));
        prop_assert!(matches!(
            WalletService::apply_debit(start, amount),
            Err(WalletError::InvalidAmount(_))
        ));
    }

    #[test]
    fn sub_cent_precision_rejected(start in balance(), micros in 1i64..1_000_000i64) {
        // Amounts with more than two decimal places never pass validation.
        let amount = Decimal::new(micros * 10 + 1, 3);
        prop_assert!(matches!(
            WalletService::apply_credit(start, amount),
            Err(WalletError::InvalidAmount(_))
        ));
    }
}
