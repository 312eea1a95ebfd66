//! Availability checking for listings.
//!
//! Bookings occupy CLOSED date intervals `[start, end]`, inclusive on both
//! ends. Two intervals conflict iff `a.start <= b.end AND a.end >= b.start`.
//! A booking ending on day N therefore conflicts with one starting on day N.
//! This surprises half-open-interval implementations but is a deliberate
//! product policy: the spot changes hands between days, not within one.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::BookingError;

/// A closed date interval occupied by a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First occupied day.
    pub start: NaiveDate,
    /// Last occupied day (inclusive).
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a range, rejecting `start > end`.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::InvalidDateRange` when the bounds are reversed.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, BookingError> {
        if start > end {
            return Err(BookingError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Inclusive overlap test against another range.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && self.end >= other.start
    }

    /// Number of days the range spans, counting both endpoints.
    #[must_use]
    pub fn duration_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Returns true if `requested` overlaps any of `existing`.
///
/// Read-only; the caller is responsible for serializing check-then-write
/// sequences (the booking repository does so with a per-listing row lock).
#[must_use]
pub fn has_overlap(existing: &[DateRange], requested: &DateRange) -> bool {
    existing.iter().any(|range| range.overlaps(requested))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    fn range(start: u32, end: u32) -> DateRange {
        DateRange::new(day(start), day(end)).unwrap()
    }

    #[test]
    fn test_reversed_range_rejected() {
        assert!(matches!(
            DateRange::new(day(5), day(3)),
            Err(BookingError::InvalidDateRange { .. })
        ));
    }

    #[test]
    fn test_single_day_range_allowed() {
        let r = range(4, 4);
        assert_eq!(r.duration_days(), 1);
    }

    #[test]
    fn test_disjoint_ranges_do_not_overlap() {
        assert!(!range(1, 3).overlaps(&range(5, 7)));
        assert!(!range(5, 7).overlaps(&range(1, 3)));
    }

    #[test]
    fn test_contained_range_overlaps() {
        // day 2 falls inside day 1..day 3
        assert!(range(1, 3).overlaps(&range(2, 2)));
    }

    #[test]
    fn test_shared_boundary_day_conflicts() {
        // inclusive policy: ending on day 3 blocks a start on day 3
        assert!(range(1, 3).overlaps(&range(3, 5)));
        assert!(range(3, 5).overlaps(&range(1, 3)));
    }

    #[test]
    fn test_adjacent_days_do_not_conflict() {
        assert!(!range(1, 3).overlaps(&range(4, 6)));
    }

    #[test]
    fn test_has_overlap_scans_all() {
        let existing = vec![range(1, 2), range(10, 12)];
        assert!(has_overlap(&existing, &range(11, 11)));
        assert!(!has_overlap(&existing, &range(5, 8)));
        assert!(!has_overlap(&[], &range(1, 28)));
    }

    #[test]
    fn test_duration_counts_both_endpoints() {
        assert_eq!(range(1, 3).duration_days(), 3);
    }
}
