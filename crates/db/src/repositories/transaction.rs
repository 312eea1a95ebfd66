//! Transaction-log repository.
//!
//! The transaction log is append-only: entries record every wallet movement
//! (`top-up`, `withdrawal`, `earning`, `payment`) and are never updated or
//! deleted.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use parkflex_core::wallet::TransactionKind;

use crate::entities::transactions;

/// Repository for the append-only transaction log.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Appends a transaction-log entry.
    ///
    /// Associated function taking any connection so callers can append
    /// inside an open database transaction alongside the wallet mutation it
    /// records.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn record<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid,
        amount: Decimal,
        kind: TransactionKind,
    ) -> Result<transactions::Model, DbErr> {
        let entry = transactions::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            amount: Set(amount),
            kind: Set(kind.into()),
            created_at: Set(Utc::now().into()),
        };

        entry.insert(conn).await
    }

    /// Lists a user's transactions, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<transactions::Model>, DbErr> {
        transactions::Entity::find()
            .filter(transactions::Column::UserId.eq(user_id))
            .order_by_desc(transactions::Column::CreatedAt)
            .all(&self.db)
            .await
    }
}
