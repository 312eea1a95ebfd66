//! Booking repository: the settlement orchestration point.
//!
//! `create_booking` is the only place where listing resolution, availability
//! checking, wallet settlement, and booking persistence are sequenced, and
//! the whole sequence runs inside one database transaction. The listing row
//! is locked (`SELECT ... FOR UPDATE`) for the duration, so two concurrent
//! requests for the same listing serialize; the `bookings_no_overlap`
//! exclusion constraint backstops the availability check at storage level.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, ModelTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::{info, warn};
use uuid::Uuid;

use parkflex_core::booking::{BookingError, BookingRequest, BookingService, DateRange, has_overlap};
use parkflex_core::notification::wallet_credited;

use crate::entities::{bookings, listings};
use crate::repositories::notification::NotificationRepository;
use crate::repositories::transaction::TransactionRepository;
use crate::repositories::wallet::WalletRepository;

/// Name of the storage-level overlap guard on the bookings table.
const OVERLAP_CONSTRAINT: &str = "bookings_no_overlap";

fn db_err(e: DbErr) -> BookingError {
    // A violation of the exclusion constraint means a concurrent writer won
    // the race for these dates; surface it as the same conflict the
    // in-transaction check reports.
    if e.to_string().contains(OVERLAP_CONSTRAINT) {
        BookingError::DateConflict
    } else {
        BookingError::Database(e.to_string())
    }
}

/// Input for creating a booking from raw request fields.
#[derive(Debug, Clone)]
pub struct CreateBookingInput {
    /// Listing being reserved.
    pub listing_id: Uuid,
    /// User making the reservation.
    pub seeker_id: Uuid,
    /// First reserved day.
    pub start_date: NaiveDate,
    /// Last reserved day (inclusive).
    pub end_date: NaiveDate,
    /// Vehicle type, free text.
    pub vehicle_type: String,
    /// Optional special requests.
    pub special_requests: Option<String>,
    /// Agreed total price.
    pub price: Decimal,
}

/// Optional fields for editing a booking.
#[derive(Debug, Clone, Default)]
pub struct UpdateBookingInput {
    /// New start date.
    pub start_date: Option<NaiveDate>,
    /// New end date.
    pub end_date: Option<NaiveDate>,
    /// New vehicle type.
    pub vehicle_type: Option<String>,
    /// New special requests.
    pub special_requests: Option<Option<String>>,
}

/// A booking joined with its listing, for list views.
#[derive(Debug, Clone)]
pub struct BookingWithListing {
    /// The booking.
    pub booking: bookings::Model,
    /// The reserved listing.
    pub listing: listings::Model,
}

/// Booking repository for settlement orchestration and CRUD.
#[derive(Debug, Clone)]
pub struct BookingRepository {
    db: DatabaseConnection,
}

impl BookingRepository {
    /// Creates a new booking repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a booking with full wallet settlement.
    ///
    /// Sequence, all inside one transaction:
    /// 1. Lock the listing row and resolve the owner.
    /// 2. Check the requested dates against existing bookings (closed
    ///    intervals, shared days conflict).
    /// 3. Debit the seeker's wallet FIRST; an insufficient balance aborts
    ///    here, before the owner is touched.
    /// 4. Credit the owner's wallet and append both transaction-log
    ///    entries (`payment`, `earning`).
    /// 5. Insert the booking and notify the owner of the credit.
    ///
    /// Any failure rolls back every step.
    ///
    /// # Errors
    ///
    /// Returns `ListingNotFound`, `DateConflict`, wallet errors from the
    /// settlement, or `Database` on query failure.
    pub async fn create_booking(
        &self,
        input: CreateBookingInput,
    ) -> Result<bookings::Model, BookingError> {
        let request = BookingRequest::validate(
            input.listing_id,
            input.seeker_id,
            input.start_date,
            input.end_date,
            &input.vehicle_type,
            input.special_requests,
            input.price,
        )?;

        let txn = self.db.begin().await.map_err(db_err)?;

        // Serializes concurrent bookings for the same listing.
        let listing = listings::Entity::find_by_id(request.listing_id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(db_err)?
            .ok_or(BookingError::ListingNotFound(request.listing_id))?;

        let existing = Self::ranges_for_listing(&txn, request.listing_id, None).await?;
        if has_overlap(&existing, &request.dates) {
            return Err(BookingError::DateConflict);
        }

        let plan = BookingService::plan_settlement(
            listing.owner_id,
            request.seeker_id,
            request.price,
        );
        let wallets = WalletRepository::new(self.db.clone());

        wallets
            .debit(&txn, plan.seeker_debit.user_id, plan.seeker_debit.amount)
            .await?;
        TransactionRepository::record(
            &txn,
            plan.seeker_debit.user_id,
            plan.seeker_debit.amount,
            plan.seeker_debit.kind,
        )
        .await
        .map_err(db_err)?;

        wallets
            .credit(&txn, plan.owner_credit.user_id, plan.owner_credit.amount)
            .await?;
        TransactionRepository::record(
            &txn,
            plan.owner_credit.user_id,
            plan.owner_credit.amount,
            plan.owner_credit.kind,
        )
        .await
        .map_err(db_err)?;

        let now = Utc::now().into();
        let booking = bookings::ActiveModel {
            id: Set(Uuid::new_v4()),
            listing_id: Set(request.listing_id),
            seeker_id: Set(request.seeker_id),
            start_date: Set(request.dates.start),
            end_date: Set(request.dates.end),
            vehicle_type: Set(request.vehicle_type.clone()),
            special_requests: Set(request.special_requests.clone()),
            price: Set(request.price),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let booking = booking.insert(&txn).await.map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;

        // Best-effort: the settlement stands even if the notification fails.
        if let Err(e) = NotificationRepository::record(
            &self.db,
            listing.owner_id,
            &wallet_credited(request.price),
        )
        .await
        {
            warn!(
                error = %e,
                owner_id = %listing.owner_id,
                "failed to record owner notification"
            );
        }

        info!(
            booking_id = %booking.id,
            listing_id = %booking.listing_id,
            seeker_id = %booking.seeker_id,
            price = %booking.price,
            "booking settled"
        );
        Ok(booking)
    }

    /// Finds a booking by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<bookings::Model>, DbErr> {
        bookings::Entity::find_by_id(id).one(&self.db).await
    }

    /// Lists every booking with its listing, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_all(&self) -> Result<Vec<BookingWithListing>, DbErr> {
        let rows = bookings::Entity::find()
            .find_also_related(listings::Entity)
            .order_by_desc(bookings::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(booking, listing)| {
                listing.map(|l| BookingWithListing {
                    booking,
                    listing: l,
                })
            })
            .collect())
    }

    /// Lists a seeker's bookings with their listings, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_seeker(
        &self,
        seeker_id: Uuid,
    ) -> Result<Vec<BookingWithListing>, DbErr> {
        let rows = bookings::Entity::find()
            .filter(bookings::Column::SeekerId.eq(seeker_id))
            .find_also_related(listings::Entity)
            .order_by_desc(bookings::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(booking, listing)| {
                listing.map(|l| BookingWithListing {
                    booking,
                    listing: l,
                })
            })
            .collect())
    }

    /// Returns the occupied date ranges for a listing, for availability
    /// calendars.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn booked_ranges(&self, listing_id: Uuid) -> Result<Vec<DateRange>, BookingError> {
        Self::ranges_for_listing(&self.db, listing_id, None).await
    }

    /// Edits a booking. When the dates change, availability is re-checked
    /// against every other booking for the listing before the update is
    /// applied. The price is never touched; the original settlement stands.
    ///
    /// # Errors
    ///
    /// Returns `BookingNotFound`, `DateConflict`, `InvalidDateRange`, or
    /// `Database`.
    pub async fn update_booking(
        &self,
        id: Uuid,
        input: UpdateBookingInput,
    ) -> Result<bookings::Model, BookingError> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let booking = bookings::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(db_err)?
            .ok_or(BookingError::BookingNotFound(id))?;

        let new_start = input.start_date.unwrap_or(booking.start_date);
        let new_end = input.end_date.unwrap_or(booking.end_date);
        let dates_changed = new_start != booking.start_date || new_end != booking.end_date;
        let new_dates = DateRange::new(new_start, new_end)?;

        if dates_changed {
            // Lock the listing so the re-check serializes with new bookings.
            listings::Entity::find_by_id(booking.listing_id)
                .lock_exclusive()
                .one(&txn)
                .await
                .map_err(db_err)?
                .ok_or(BookingError::ListingNotFound(booking.listing_id))?;

            let others =
                Self::ranges_for_listing(&txn, booking.listing_id, Some(booking.id)).await?;
            if has_overlap(&others, &new_dates) {
                return Err(BookingError::DateConflict);
            }
        }

        let mut active = booking.into_active_model();
        active.start_date = Set(new_dates.start);
        active.end_date = Set(new_dates.end);
        if let Some(vehicle_type) = input.vehicle_type {
            active.vehicle_type = Set(vehicle_type);
        }
        if let Some(special_requests) = input.special_requests {
            active.special_requests = Set(special_requests);
        }
        active.updated_at = Set(Utc::now().into());
        let updated = active.update(&txn).await.map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;
        Ok(updated)
    }

    /// Deletes a booking, freeing its dates. The settlement is not
    /// reversed; no funds move on cancellation.
    ///
    /// # Errors
    ///
    /// Returns `BookingNotFound` or `Database`.
    pub async fn delete(&self, id: Uuid) -> Result<(), BookingError> {
        let booking = bookings::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or(BookingError::BookingNotFound(id))?;

        booking.delete(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    /// Checks whether a user has ever booked a listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn seeker_has_booked(
        &self,
        seeker_id: Uuid,
        listing_id: Uuid,
    ) -> Result<bool, DbErr> {
        let found = bookings::Entity::find()
            .filter(bookings::Column::SeekerId.eq(seeker_id))
            .filter(bookings::Column::ListingId.eq(listing_id))
            .limit(1)
            .one(&self.db)
            .await?;

        Ok(found.is_some())
    }

    /// Loads the occupied ranges for a listing, optionally excluding one
    /// booking (for edits re-checking their own dates).
    async fn ranges_for_listing<C: ConnectionTrait>(
        conn: &C,
        listing_id: Uuid,
        exclude: Option<Uuid>,
    ) -> Result<Vec<DateRange>, BookingError> {
        let mut query = bookings::Entity::find()
            .filter(bookings::Column::ListingId.eq(listing_id));
        if let Some(booking_id) = exclude {
            query = query.filter(bookings::Column::Id.ne(booking_id));
        }
        let rows = query.all(conn).await.map_err(db_err)?;

        rows.into_iter()
            .map(|b| DateRange::new(b.start_date, b.end_date))
            .collect()
    }
}
