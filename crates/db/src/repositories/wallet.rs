//! Wallet repository with atomic balance mutations.
//!
//! All balance changes are single server-side UPDATE statements
//! (`balance = balance + x`); the process never computes a new balance from
//! a previously read value. Debits are conditional on `balance >= x`, so a
//! concurrent debit can never push a wallet negative.

use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    TransactionTrait,
};
use uuid::Uuid;

use parkflex_core::wallet::{TransactionKind, WalletError, WalletService};

use crate::entities::wallets;
use crate::repositories::transaction::TransactionRepository;

fn db_err(e: DbErr) -> WalletError {
    WalletError::Database(e.to_string())
}

/// Wallet repository for balance reads and ledger mutations.
#[derive(Debug, Clone)]
pub struct WalletRepository {
    db: DatabaseConnection,
}

impl WalletRepository {
    /// Creates a new wallet repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a user's wallet.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_user(&self, user_id: Uuid) -> Result<Option<wallets::Model>, DbErr> {
        wallets::Entity::find()
            .filter(wallets::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
    }

    /// Atomically credits a wallet: `balance = balance + amount`.
    ///
    /// Usable inside an open transaction via the `conn` parameter.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::InvalidAmount` for a non-positive or sub-cent
    /// amount, `WalletError::WalletNotFound` if the user has no wallet, and
    /// `WalletError::Database` on query failure.
    pub async fn credit<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: Uuid,
        amount: Decimal,
    ) -> Result<(), WalletError> {
        WalletService::validate_amount(amount)?;

        let result = wallets::Entity::update_many()
            .col_expr(
                wallets::Column::Balance,
                Expr::col(wallets::Column::Balance).add(amount),
            )
            .filter(wallets::Column::UserId.eq(user_id))
            .exec(conn)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(WalletError::WalletNotFound(user_id));
        }
        Ok(())
    }

    /// Atomically debits a wallet: `balance = balance - amount`, guarded by
    /// `balance >= amount` in the same statement.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::InsufficientFunds` when the guard rejects the
    /// debit, `WalletError::WalletNotFound` if the user has no wallet, and
    /// `WalletError::InvalidAmount` / `WalletError::Database` as for
    /// [`credit`](Self::credit).
    pub async fn debit<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: Uuid,
        amount: Decimal,
    ) -> Result<(), WalletError> {
        WalletService::validate_amount(amount)?;

        let result = wallets::Entity::update_many()
            .col_expr(
                wallets::Column::Balance,
                Expr::col(wallets::Column::Balance).sub(amount),
            )
            .filter(wallets::Column::UserId.eq(user_id))
            .filter(wallets::Column::Balance.gte(amount))
            .exec(conn)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            // Zero rows means either no wallet or the balance guard fired.
            let wallet = wallets::Entity::find()
                .filter(wallets::Column::UserId.eq(user_id))
                .one(conn)
                .await
                .map_err(db_err)?
                .ok_or(WalletError::WalletNotFound(user_id))?;

            return Err(WalletError::InsufficientFunds {
                balance: wallet.balance,
                requested: amount,
            });
        }
        Ok(())
    }

    /// Deposits funds: credit plus a `top-up` transaction-log entry, in one
    /// database transaction.
    ///
    /// # Errors
    ///
    /// Returns wallet errors as for [`credit`](Self::credit).
    pub async fn top_up(&self, user_id: Uuid, amount: Decimal) -> Result<wallets::Model, WalletError> {
        let txn = self.db.begin().await.map_err(db_err)?;

        self.credit(&txn, user_id, amount).await?;
        TransactionRepository::record(&txn, user_id, amount, TransactionKind::TopUp)
            .await
            .map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;

        self.find_by_user(user_id)
            .await
            .map_err(db_err)?
            .ok_or(WalletError::WalletNotFound(user_id))
    }

    /// Withdraws funds: conditional debit plus a `withdrawal`
    /// transaction-log entry, in one database transaction.
    ///
    /// # Errors
    ///
    /// Returns wallet errors as for [`debit`](Self::debit).
    pub async fn withdraw(
        &self,
        user_id: Uuid,
        amount: Decimal,
    ) -> Result<wallets::Model, WalletError> {
        let txn = self.db.begin().await.map_err(db_err)?;

        self.debit(&txn, user_id, amount).await?;
        TransactionRepository::record(&txn, user_id, amount, TransactionKind::Withdrawal)
            .await
            .map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;

        self.find_by_user(user_id)
            .await
            .map_err(db_err)?
            .ok_or(WalletError::WalletNotFound(user_id))
    }
}
