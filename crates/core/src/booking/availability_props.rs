//! Property-based tests for the inclusive overlap predicate.

use chrono::NaiveDate;
use proptest::prelude::*;

use super::availability::DateRange;

const EPOCH: i32 = 738_000; // arbitrary day number base, keeps dates in range

fn date_from_offset(offset: i32) -> NaiveDate {
    NaiveDate::from_num_days_from_ce_opt(EPOCH + offset).unwrap()
}

/// Strategy for a valid closed range within a one-year window.
fn date_range() -> impl Strategy<Value = DateRange> {
    (0i32..365, 0i32..30).prop_map(|(start, len)| {
        DateRange::new(date_from_offset(start), date_from_offset(start + len)).unwrap()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Overlap is symmetric.
    #[test]
    fn prop_overlap_symmetric(a in date_range(), b in date_range()) {
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
    }

    /// Every range overlaps itself.
    #[test]
    fn prop_overlap_reflexive(a in date_range()) {
        prop_assert!(a.overlaps(&a));
    }

    /// The predicate matches its definition: a.start <= b.end && a.end >= b.start.
    #[test]
    fn prop_overlap_matches_definition(a in date_range(), b in date_range()) {
        let expected = a.start <= b.end && a.end >= b.start;
        prop_assert_eq!(a.overlaps(&b), expected);
    }

    /// Two ranges overlap iff they share at least one calendar day
    /// (closed-interval semantics).
    #[test]
    fn prop_overlap_iff_shared_day(a in date_range(), b in date_range()) {
        let shared_day = a.start.max(b.start) <= a.end.min(b.end);
        prop_assert_eq!(a.overlaps(&b), shared_day);
    }

    /// Duration counts both endpoints and is always at least one day.
    #[test]
    fn prop_duration_positive(a in date_range()) {
        prop_assert!(a.duration_days() >= 1);
        prop_assert_eq!(a.duration_days(), (a.end - a.start).num_days() + 1);
    }
}
