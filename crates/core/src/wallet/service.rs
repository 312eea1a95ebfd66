//! Wallet service: pure balance arithmetic and rejection rules.
//!
//! The persistence layer applies these rules with atomic server-side updates
//! (`balance = balance + x`, conditional on `balance >= x` for debits); this
//! module is the single source of truth for what those updates are allowed
//! to do.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use parkflex_shared::types::money;

use super::error::WalletError;

/// Kind of a transaction-log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransactionKind {
    /// Direct deposit into the wallet.
    TopUp,
    /// Direct withdrawal from the wallet.
    Withdrawal,
    /// Credit from a booking settlement (owner side).
    Earning,
    /// Debit from a booking settlement (seeker side).
    Payment,
}

impl TransactionKind {
    /// Returns the wire representation used in the API and database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TopUp => "top-up",
            Self::Withdrawal => "withdrawal",
            Self::Earning => "earning",
            Self::Payment => "payment",
        }
    }

    /// Returns true for kinds that increase the balance.
    #[must_use]
    pub const fn is_credit(self) -> bool {
        matches!(self, Self::TopUp | Self::Earning)
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top-up" => Ok(Self::TopUp),
            "withdrawal" => Ok(Self::Withdrawal),
            "earning" => Ok(Self::Earning),
            "payment" => Ok(Self::Payment),
            _ => Err(format!("Unknown transaction kind: {s}")),
        }
    }
}

/// Wallet service for pure ledger arithmetic.
pub struct WalletService;

impl WalletService {
    /// Validates a mutation amount: strictly positive, at most 2 decimals.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::InvalidAmount` otherwise.
    pub fn validate_amount(amount: Decimal) -> Result<(), WalletError> {
        if money::is_valid_amount(amount) {
            Ok(())
        } else {
            Err(WalletError::InvalidAmount(amount))
        }
    }

    /// Computes the balance after a credit.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::InvalidAmount` if the amount is not a valid
    /// monetary value.
    pub fn apply_credit(balance: Decimal, amount: Decimal) -> Result<Decimal, WalletError> {
        Self::validate_amount(amount)?;
        Ok(balance + amount)
    }

    /// Computes the balance after a debit.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::InvalidAmount` for non-positive amounts and
    /// `WalletError::InsufficientFunds` if the balance cannot cover it.
    pub fn apply_debit(balance: Decimal, amount: Decimal) -> Result<Decimal, WalletError> {
        Self::validate_amount(amount)?;
        if balance < amount {
            return Err(WalletError::InsufficientFunds {
                balance,
                requested: amount,
            });
        }
        Ok(balance - amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_kind_round_trip() {
        for kind in [
            TransactionKind::TopUp,
            TransactionKind::Withdrawal,
            TransactionKind::Earning,
            TransactionKind::Payment,
        ] {
            assert_eq!(kind.as_str().parse::<TransactionKind>().unwrap(), kind);
        }
        assert!("refund".parse::<TransactionKind>().is_err());
    }

    #[test]
    fn test_kind_direction() {
        assert!(TransactionKind::TopUp.is_credit());
        assert!(TransactionKind::Earning.is_credit());
        assert!(!TransactionKind::Withdrawal.is_credit());
        assert!(!TransactionKind::Payment.is_credit());
    }

    #[test]
    fn test_credit_adds_exactly() {
        assert_eq!(
            WalletService::apply_credit(dec!(0), dec!(50)).unwrap(),
            dec!(50)
        );
        assert_eq!(
            WalletService::apply_credit(dec!(10.25), dec!(0.75)).unwrap(),
            dec!(11.00)
        );
    }

    #[test]
    fn test_debit_subtracts_exactly() {
        assert_eq!(
            WalletService::apply_debit(dec!(100), dec!(50)).unwrap(),
            dec!(50)
        );
        // debit down to exactly zero is allowed
        assert_eq!(
            WalletService::apply_debit(dec!(50), dec!(50)).unwrap(),
            dec!(0)
        );
    }

    #[test]
    fn test_debit_insufficient_funds() {
        let err = WalletService::apply_debit(dec!(10), dec!(50)).unwrap_err();
        assert!(matches!(
            err,
            WalletError::InsufficientFunds {
                balance,
                requested,
            } if balance == dec!(10) && requested == dec!(50)
        ));
    }

    #[test]
    fn test_rejects_invalid_amounts() {
        for amount in [dec!(0), dec!(-5), dec!(0.001)] {
            assert!(matches!(
                WalletService::apply_credit(dec!(100), amount),
                Err(WalletError::InvalidAmount(_))
            ));
            assert!(matches!(
                WalletService::apply_debit(dec!(100), amount),
                Err(WalletError::InvalidAmount(_))
            ));
        }
    }

    #[test]
    fn test_credit_then_debit_round_trips() {
        let start = dec!(123.45);
        let amount = dec!(67.89);
        let credited = WalletService::apply_credit(start, amount).unwrap();
        let back = WalletService::apply_debit(credited, amount).unwrap();
        assert_eq!(back, start);
    }
}
