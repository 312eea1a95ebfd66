//! Notification repository with destructive-read delivery.
//!
//! Fetching a user's notifications marks every returned row read in the
//! same transaction. The models handed back carry the flags as they were
//! BEFORE the update, so a client can still distinguish fresh notifications
//! from ones it has seen.

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::notifications;

/// Notification repository.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    db: DatabaseConnection,
}

impl NotificationRepository {
    /// Creates a new notification repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts an unread notification.
    ///
    /// Associated function taking any connection so callers can emit
    /// notifications inside an open transaction (booking settlement does).
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn record<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid,
        message: &str,
    ) -> Result<notifications::Model, DbErr> {
        let notification = notifications::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            message: Set(message.to_string()),
            read: Set(false),
            created_at: Set(Utc::now().into()),
        };

        notification.insert(conn).await
    }

    /// Inserts an unread notification on the repository's own connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create(
        &self,
        user_id: Uuid,
        message: &str,
    ) -> Result<notifications::Model, DbErr> {
        Self::record(&self.db, user_id, message).await
    }

    /// Returns a user's notifications, newest first, and marks them all
    /// read. The returned models keep their pre-update read flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction fails.
    pub async fn fetch_and_mark_read(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<notifications::Model>, DbErr> {
        let txn = self.db.begin().await?;

        let rows = notifications::Entity::find()
            .filter(notifications::Column::UserId.eq(user_id))
            .order_by_desc(notifications::Column::CreatedAt)
            .all(&txn)
            .await?;

        notifications::Entity::update_many()
            .col_expr(notifications::Column::Read, Expr::value(true))
            .filter(notifications::Column::UserId.eq(user_id))
            .filter(notifications::Column::Read.eq(false))
            .exec(&txn)
            .await?;

        txn.commit().await?;
        Ok(rows)
    }
}
