//! Review rules for listings.

pub mod rules;

pub use rules::{MIN_DESCRIPTION_LEN, ReviewContext, ReviewError, validate_review};
