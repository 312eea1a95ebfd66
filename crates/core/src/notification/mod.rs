//! Notification message templates.
//!
//! Notifications are fire-and-forget records; these builders keep the
//! user-visible wording in one place.

use rust_decimal::Decimal;

/// Message sent to an owner when their wallet is credited.
#[must_use]
pub fn wallet_credited(amount: Decimal) -> String {
    format!("Amount ${amount} has been credited in your wallet.")
}

/// Message sent to an owner when a listing receives a new review.
#[must_use]
pub fn new_review(listing_name: &str) -> String {
    format!("You have a new review on your listing: {listing_name}.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_wallet_credited_wording() {
        assert_eq!(
            wallet_credited(dec!(50)),
            "Amount $50 has been credited in your wallet."
        );
    }

    #[test]
    fn test_new_review_wording() {
        assert_eq!(
            new_review("Downtown Garage"),
            "You have a new review on your listing: Downtown Garage."
        );
    }
}
