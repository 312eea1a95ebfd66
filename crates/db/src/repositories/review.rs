//! Review repository.
//!
//! Gathers the facts review validation needs (ownership, prior booking,
//! existing review) and persists accepted reviews. On acceptance the
//! listing owner gets a notification.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use tracing::warn;
use uuid::Uuid;

use parkflex_core::notification::new_review;
use parkflex_core::review::ReviewContext;

use crate::entities::{bookings, listings, reviews, users};
use crate::repositories::notification::NotificationRepository;

/// A review joined with its author's display name.
#[derive(Debug, Clone)]
pub struct ReviewWithAuthor {
    /// The review.
    pub review: reviews::Model,
    /// Author's first name.
    pub author_first_name: String,
    /// Author's last name.
    pub author_last_name: String,
}

/// Aggregate rating figures for a listing.
#[derive(Debug, Clone, Copy)]
pub struct ReviewStats {
    /// Number of reviews.
    pub count: u64,
    /// Mean rating, 2 decimal places; zero when there are no reviews.
    pub average_rating: Decimal,
}

/// Review repository.
#[derive(Debug, Clone)]
pub struct ReviewRepository {
    db: DatabaseConnection,
}

impl ReviewRepository {
    /// Creates a new review repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gathers the reviewer's relationship to a listing for validation.
    ///
    /// # Errors
    ///
    /// Returns `DbErr::RecordNotFound` if the listing does not exist, or
    /// any other query error.
    pub async fn context_for(
        &self,
        listing_id: Uuid,
        reviewer: Uuid,
    ) -> Result<ReviewContext, DbErr> {
        let listing = listings::Entity::find_by_id(listing_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("listing {listing_id}")))?;

        let has_booking = bookings::Entity::find()
            .filter(bookings::Column::ListingId.eq(listing_id))
            .filter(bookings::Column::SeekerId.eq(reviewer))
            .count(&self.db)
            .await?
            > 0;

        let already_reviewed = reviews::Entity::find()
            .filter(reviews::Column::ListingId.eq(listing_id))
            .filter(reviews::Column::UserId.eq(reviewer))
            .count(&self.db)
            .await?
            > 0;

        Ok(ReviewContext {
            listing_owner: listing.owner_id,
            reviewer,
            has_booking,
            already_reviewed,
        })
    }

    /// Persists an accepted review and notifies the listing owner.
    ///
    /// Callers must have validated the review first; the unique
    /// `(listing_id, user_id)` constraint backstops the one-review rule.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create(
        &self,
        listing_id: Uuid,
        user_id: Uuid,
        rating: i32,
        description: &str,
    ) -> Result<reviews::Model, DbErr> {
        let review = reviews::ActiveModel {
            id: Set(Uuid::new_v4()),
            listing_id: Set(listing_id),
            user_id: Set(user_id),
            rating: Set(rating),
            description: Set(description.to_string()),
            created_at: Set(Utc::now().into()),
        };
        let review = review.insert(&self.db).await?;

        // Best-effort: the review stands even if the notification fails.
        match listings::Entity::find_by_id(listing_id).one(&self.db).await {
            Ok(Some(listing)) => {
                if let Err(e) = NotificationRepository::record(
                    &self.db,
                    listing.owner_id,
                    &new_review(&listing.name),
                )
                .await
                {
                    warn!(error = %e, listing_id = %listing_id, "failed to record review notification");
                }
            }
            Ok(None) => {}
            Err(e) => {
                warn!(error = %e, listing_id = %listing_id, "failed to load listing for review notification");
            }
        }

        Ok(review)
    }

    /// Lists a listing's reviews with author names, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_listing(
        &self,
        listing_id: Uuid,
    ) -> Result<Vec<ReviewWithAuthor>, DbErr> {
        let rows = reviews::Entity::find()
            .filter(reviews::Column::ListingId.eq(listing_id))
            .find_also_related(users::Entity)
            .order_by_desc(reviews::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(review, author)| {
                author.map(|a| ReviewWithAuthor {
                    review,
                    author_first_name: a.first_name,
                    author_last_name: a.last_name,
                })
            })
            .collect())
    }

    /// Computes the review count and mean rating for a listing.
    ///
    /// The mean is computed in `Decimal` and rounded to 2 places; an
    /// unreviewed listing reports a count of zero and an average of zero.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn stats_for_listing(&self, listing_id: Uuid) -> Result<ReviewStats, DbErr> {
        let rows = reviews::Entity::find()
            .filter(reviews::Column::ListingId.eq(listing_id))
            .all(&self.db)
            .await?;

        let count = rows.len() as u64;
        if count == 0 {
            return Ok(ReviewStats {
                count: 0,
                average_rating: Decimal::ZERO,
            });
        }

        let total: Decimal = rows.iter().map(|r| Decimal::from(r.rating)).sum();
        let average_rating = (total / Decimal::from(count)).round_dp(2);

        Ok(ReviewStats {
            count,
            average_rating,
        })
    }
}
