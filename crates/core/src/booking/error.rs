//! Booking error types.

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::wallet::WalletError;

/// Errors that can occur during booking operations.
#[derive(Debug, Error)]
pub enum BookingError {
    /// Listing does not exist.
    #[error("Listing not found: {0}")]
    ListingNotFound(Uuid),

    /// Booking does not exist.
    #[error("Booking not found: {0}")]
    BookingNotFound(Uuid),

    /// The requested dates overlap an existing booking for the listing.
    #[error(
        "This listing is already booked for the selected dates. Please select different dates."
    )]
    DateConflict,

    /// Start date is after end date.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Requested start date.
        start: NaiveDate,
        /// Requested end date.
        end: NaiveDate,
    },

    /// A required field is missing or malformed.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Wallet settlement failed.
    #[error(transparent)]
    Wallet(#[from] WalletError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl BookingError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::ListingNotFound(_) => "LISTING_NOT_FOUND",
            Self::BookingNotFound(_) => "BOOKING_NOT_FOUND",
            Self::DateConflict => "DATE_CONFLICT",
            Self::InvalidDateRange { .. } => "INVALID_DATE_RANGE",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Wallet(e) => e.error_code(),
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    ///
    /// `DateConflict` maps to 400 (not 409) to preserve the public API
    /// contract.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::ListingNotFound(_) | Self::BookingNotFound(_) => 404,
            Self::DateConflict | Self::InvalidDateRange { .. } | Self::Validation(_) => 400,
            Self::Wallet(e) => e.http_status_code(),
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
            BookingError::ListingNotFound(Uuid::nil()).http_status_code(),
            404
        );
        assert_eq!(
            BookingError::BookingNotFound(Uuid::nil()).http_status_code(),
            404
        );
        assert_eq!(BookingError::DateConflict.http_status_code(), 400);
        assert_eq!(
            BookingError::Validation("x".into()).http_status_code(),
            400
        );
        assert_eq!(
            BookingError::Database("x".into()).http_status_code(),
            500
        );
    }

    #[test]
    fn test_wallet_errors_keep_their_status() {
        let insufficient = BookingError::Wallet(WalletError::InsufficientFunds {
            balance: dec!(10),
            requested: dec!(50),
        });
        assert_eq!(insufficient.http_status_code(), 400);
        assert_eq!(insufficient.error_code(), "INSUFFICIENT_FUNDS");

        let missing = BookingError::Wallet(WalletError::WalletNotFound(Uuid::nil()));
        assert_eq!(missing.http_status_code(), 404);
    }
}
