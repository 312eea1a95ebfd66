//! Wishlist repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{listings, wishlists};

/// Wishlist repository.
#[derive(Debug, Clone)]
pub struct WishlistRepository {
    db: DatabaseConnection,
}

impl WishlistRepository {
    /// Creates a new wishlist repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Adds a listing to a user's wishlist.
    ///
    /// The `(user_id, listing_id)` unique constraint rejects duplicates;
    /// callers should check [`exists`](Self::exists) first for a friendly
    /// error.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn add(&self, user_id: Uuid, listing_id: Uuid) -> Result<wishlists::Model, DbErr> {
        let entry = wishlists::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            listing_id: Set(listing_id),
            created_at: Set(Utc::now().into()),
        };

        entry.insert(&self.db).await
    }

    /// Removes a listing from a user's wishlist. Returns whether an entry
    /// existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub async fn remove(&self, user_id: Uuid, listing_id: Uuid) -> Result<bool, DbErr> {
        let Some(entry) = wishlists::Entity::find()
            .filter(wishlists::Column::UserId.eq(user_id))
            .filter(wishlists::Column::ListingId.eq(listing_id))
            .one(&self.db)
            .await?
        else {
            return Ok(false);
        };

        entry.delete(&self.db).await?;
        Ok(true)
    }

    /// Checks whether a listing is on a user's wishlist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn exists(&self, user_id: Uuid, listing_id: Uuid) -> Result<bool, DbErr> {
        let count = wishlists::Entity::find()
            .filter(wishlists::Column::UserId.eq(user_id))
            .filter(wishlists::Column::ListingId.eq(listing_id))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    /// Lists a user's wishlisted listings, newest wish first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<listings::Model>, DbErr> {
        let rows = wishlists::Entity::find()
            .filter(wishlists::Column::UserId.eq(user_id))
            .find_also_related(listings::Entity)
            .order_by_desc(wishlists::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().filter_map(|(_, listing)| listing).collect())
    }
}
