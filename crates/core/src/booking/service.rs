//! Booking service: request validation and settlement planning.
//!
//! A booking moves through Requested -> Validated -> Settled -> Persisted;
//! any failure exits to Rejected with nothing persisted. This module covers
//! the Requested -> Validated step and produces the settlement plan the
//! persistence layer executes transactionally.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use parkflex_shared::types::money;

use super::availability::DateRange;
use super::error::BookingError;
use crate::wallet::TransactionKind;

/// A validated booking request.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    /// Listing being reserved.
    pub listing_id: Uuid,
    /// User making the reservation.
    pub seeker_id: Uuid,
    /// Reserved interval (closed).
    pub dates: DateRange,
    /// Vehicle type, free text, required.
    pub vehicle_type: String,
    /// Optional free-text special request.
    pub special_requests: Option<String>,
    /// Agreed total price.
    pub price: Decimal,
}

impl BookingRequest {
    /// Validates raw request fields into a `BookingRequest`.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::InvalidDateRange` for reversed dates and
    /// `BookingError::Validation` for missing vehicle type or a
    /// non-positive price.
    #[allow(clippy::too_many_arguments)]
    pub fn validate(
        listing_id: Uuid,
        seeker_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
        vehicle_type: &str,
        special_requests: Option<String>,
        price: Decimal,
    ) -> Result<Self, BookingError> {
        let dates = DateRange::new(start_date, end_date)?;

        if vehicle_type.trim().is_empty() {
            return Err(BookingError::Validation(
                "vehicleType is required".to_string(),
            ));
        }

        if !money::is_valid_amount(price) {
            return Err(BookingError::Validation(format!(
                "bookingPrice must be a positive amount: {price}"
            )));
        }

        Ok(Self {
            listing_id,
            seeker_id,
            dates,
            vehicle_type: vehicle_type.trim().to_string(),
            special_requests,
            price,
        })
    }
}

/// One wallet mutation plus its transaction-log kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerInstruction {
    /// Wallet owner.
    pub user_id: Uuid,
    /// Amount to move.
    pub amount: Decimal,
    /// Transaction-log kind to append.
    pub kind: TransactionKind,
}

/// The two wallet mutations a booking settlement performs, in execution
/// order: the seeker debit comes FIRST so an insufficient balance aborts
/// before the owner is ever credited (no partial-failure window).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettlementPlan {
    /// Debit of the seeker's wallet (kind `payment`).
    pub seeker_debit: LedgerInstruction,
    /// Credit of the owner's wallet (kind `earning`).
    pub owner_credit: LedgerInstruction,
}

/// Booking service for pure orchestration logic.
pub struct BookingService;

impl BookingService {
    /// Plans the wallet settlement for a booking.
    #[must_use]
    pub const fn plan_settlement(
        owner_id: Uuid,
        seeker_id: Uuid,
        price: Decimal,
    ) -> SettlementPlan {
        SettlementPlan {
            seeker_debit: LedgerInstruction {
                user_id: seeker_id,
                amount: price,
                kind: TransactionKind::Payment,
            },
            owner_credit: LedgerInstruction {
                user_id: owner_id,
                amount: price,
                kind: TransactionKind::Earning,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 4, d).unwrap()
    }

    #[test]
    fn test_validate_accepts_single_day_booking() {
        let req = BookingRequest::validate(
            Uuid::new_v4(),
            Uuid::new_v4(),
            day(1),
            day(1),
            "sedan",
            None,
            dec!(50),
        )
        .unwrap();
        assert_eq!(req.dates.duration_days(), 1);
        assert_eq!(req.vehicle_type, "sedan");
    }

    #[test]
    fn test_validate_rejects_reversed_dates() {
        let err = BookingRequest::validate(
            Uuid::new_v4(),
            Uuid::new_v4(),
            day(5),
            day(2),
            "sedan",
            None,
            dec!(50),
        )
        .unwrap_err();
        assert!(matches!(err, BookingError::InvalidDateRange { .. }));
    }

    #[test]
    fn test_validate_rejects_blank_vehicle_type() {
        let err = BookingRequest::validate(
            Uuid::new_v4(),
            Uuid::new_v4(),
            day(1),
            day(2),
            "   ",
            None,
            dec!(50),
        )
        .unwrap_err();
        assert!(matches!(err, BookingError::Validation(_)));
    }

    #[test]
    fn test_validate_rejects_non_positive_price() {
        for price in [dec!(0), dec!(-10)] {
            let err = BookingRequest::validate(
                Uuid::new_v4(),
                Uuid::new_v4(),
                day(1),
                day(2),
                "suv",
                None,
                price,
            )
            .unwrap_err();
            assert!(matches!(err, BookingError::Validation(_)));
        }
    }

    #[test]
    fn test_settlement_plan_debits_seeker_credits_owner() {
        let owner = Uuid::new_v4();
        let seeker = Uuid::new_v4();
        let plan = BookingService::plan_settlement(owner, seeker, dec!(50));

        assert_eq!(plan.seeker_debit.user_id, seeker);
        assert_eq!(plan.seeker_debit.kind, TransactionKind::Payment);
        assert_eq!(plan.owner_credit.user_id, owner);
        assert_eq!(plan.owner_credit.kind, TransactionKind::Earning);
        assert_eq!(plan.seeker_debit.amount, plan.owner_credit.amount);
    }
}
