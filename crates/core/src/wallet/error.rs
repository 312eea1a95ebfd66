//! Wallet error types.

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during wallet operations.
#[derive(Debug, Error)]
pub enum WalletError {
    /// The user has no wallet.
    #[error("Wallet not found for user {0}")]
    WalletNotFound(Uuid),

    /// The balance cannot cover the requested debit.
    #[error("Insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds {
        /// Current wallet balance.
        balance: Decimal,
        /// Amount the caller tried to debit.
        requested: Decimal,
    },

    /// The amount is zero, negative, or has sub-cent precision.
    #[error("Amount must be a positive value with at most 2 decimal places: {0}")]
    InvalidAmount(Decimal),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl WalletError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::WalletNotFound(_) => "WALLET_NOT_FOUND",
            Self::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::WalletNotFound(_) => 404,
            Self::InsufficientFunds { .. } | Self::InvalidAmount(_) => 400,
            Self::Database(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            WalletError::WalletNotFound(Uuid::nil()).http_status_code(),
            404
        );
        assert_eq!(
            WalletError::InsufficientFunds {
                balance: dec!(10),
                requested: dec!(50),
            }
            .http_status_code(),
            400
        );
        assert_eq!(
            WalletError::InvalidAmount(dec!(-1)).http_status_code(),
            400
        );
        assert_eq!(
            WalletError::Database("boom".into()).http_status_code(),
            500
        );
    }

    #[test]
    fn test_insufficient_funds_display() {
        let err = WalletError::InsufficientFunds {
            balance: dec!(10.00),
            requested: dec!(50.00),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient funds: balance 10.00, requested 50.00"
        );
    }
}
