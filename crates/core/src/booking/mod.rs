//! Booking rules: availability checking, request validation, settlement
//! planning.
//!
//! Bookings reserve a listing for a closed date interval. The overlap policy
//! is inclusive on both ends: a booking ending on day N conflicts with a
//! booking starting on day N. See [`availability`] for the predicate.

pub mod availability;
pub mod error;
pub mod service;

#[cfg(test)]
mod availability_props;

pub use availability::{DateRange, has_overlap};
pub use error::BookingError;
pub use service::{BookingRequest, BookingService, LedgerInstruction, SettlementPlan};
