//! Core business logic for ParkFlex.
//!
//! This crate contains the marketplace rules with no web or database
//! dependencies:
//! - Wallet ledger rules (credit/debit invariants, transaction kinds)
//! - Availability checking (inclusive date-interval overlap)
//! - Booking validation and settlement planning
//! - Review rules
//! - Notification message templates
//! - Password hashing and reset tokens

pub mod auth;
pub mod booking;
pub mod notification;
pub mod review;
pub mod wallet;
