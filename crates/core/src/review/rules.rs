//! Review validation rules.
//!
//! A review requires a rating of 1..=5 and a description of at least 5
//! characters; owners cannot review their own listings; a prior booking with
//! the listing is required; one review per user per listing.

use thiserror::Error;
use uuid::Uuid;

/// Minimum description length in characters.
pub const MIN_DESCRIPTION_LEN: usize = 5;

/// Errors that can occur when adding a review.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReviewError {
    /// Rating is outside 1..=5.
    #[error("rating should be a number between 1 and 5.")]
    RatingOutOfRange,

    /// Description is too short.
    #[error("description should atleast contain 5 characters.")]
    DescriptionTooShort,

    /// The reviewer owns the listing.
    #[error("Owners cannot review their own listing.")]
    OwnReview,

    /// The reviewer never booked the listing.
    #[error(
        "To add your own review, you need a previous booking with this parking spot."
    )]
    NoPriorBooking,

    /// The reviewer already reviewed this listing.
    #[error("You have already reviewed this parking spot listing.")]
    AlreadyReviewed,
}

impl ReviewError {
    /// Returns the HTTP status code for this error. All are caller mistakes.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        400
    }
}

/// Facts about the reviewer's relationship to the listing, gathered by the
/// persistence layer before validation.
#[derive(Debug, Clone, Copy)]
pub struct ReviewContext {
    /// The listing's owner.
    pub listing_owner: Uuid,
    /// The user submitting the review.
    pub reviewer: Uuid,
    /// Whether the reviewer has any booking with the listing.
    pub has_booking: bool,
    /// Whether the reviewer already reviewed the listing.
    pub already_reviewed: bool,
}

/// Validates a review submission.
///
/// # Errors
///
/// Returns the first violated rule, in the order the original contract
/// checks them: rating, description, ownership, booking history, duplicate.
pub fn validate_review(
    rating: i32,
    description: &str,
    ctx: &ReviewContext,
) -> Result<(), ReviewError> {
    if !(1..=5).contains(&rating) {
        return Err(ReviewError::RatingOutOfRange);
    }
    if description.chars().count() < MIN_DESCRIPTION_LEN {
        return Err(ReviewError::DescriptionTooShort);
    }
    if ctx.listing_owner == ctx.reviewer {
        return Err(ReviewError::OwnReview);
    }
    if !ctx.has_booking {
        return Err(ReviewError::NoPriorBooking);
    }
    if ctx.already_reviewed {
        return Err(ReviewError::AlreadyReviewed);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn ctx() -> ReviewContext {
        ReviewContext {
            listing_owner: Uuid::new_v4(),
            reviewer: Uuid::new_v4(),
            has_booking: true,
            already_reviewed: false,
        }
    }

    #[rstest]
    #[case(0)]
    #[case(6)]
    #[case(-1)]
    fn test_rating_out_of_range(#[case] rating: i32) {
        assert_eq!(
            validate_review(rating, "great spot", &ctx()),
            Err(ReviewError::RatingOutOfRange)
        );
    }

    #[test]
    fn test_description_too_short() {
        assert_eq!(
            validate_review(4, "nice", &ctx()),
            Err(ReviewError::DescriptionTooShort)
        );
    }

    #[test]
    fn test_owner_cannot_review_own_listing() {
        let user = Uuid::new_v4();
        let ctx = ReviewContext {
            listing_owner: user,
            reviewer: user,
            has_booking: true,
            already_reviewed: false,
        };
        assert_eq!(
            validate_review(4, "great spot", &ctx),
            Err(ReviewError::OwnReview)
        );
    }

    #[test]
    fn test_requires_prior_booking() {
        let ctx = ReviewContext {
            has_booking: false,
            ..ctx()
        };
        assert_eq!(
            validate_review(4, "great spot", &ctx),
            Err(ReviewError::NoPriorBooking)
        );
    }

    #[test]
    fn test_rejects_duplicate_review() {
        let ctx = ReviewContext {
            already_reviewed: true,
            ..ctx()
        };
        assert_eq!(
            validate_review(4, "great spot", &ctx),
            Err(ReviewError::AlreadyReviewed)
        );
    }

    #[test]
    fn test_valid_review_passes() {
        assert_eq!(validate_review(5, "great spot", &ctx()), Ok(()));
    }
}
