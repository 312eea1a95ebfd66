//! User repository for account and credential database operations.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{users, wallets};

/// Optional profile fields for a partial update.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileInput {
    /// New first name, if changing.
    pub first_name: Option<String>,
    /// New last name, if changing.
    pub last_name: Option<String>,
    /// New email, if changing.
    pub email: Option<String>,
    /// New password hash, if changing.
    pub password_hash: Option<String>,
}

/// User repository for CRUD and credential operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a user and their zero-balance wallet in one transaction.
    ///
    /// Every user gets exactly one wallet at registration; no code path
    /// creates a wallet anywhere else.
    ///
    /// # Errors
    ///
    /// Returns an error if either insert fails (including a duplicate
    /// email violating the unique constraint).
    pub async fn create_with_wallet(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<users::Model, DbErr> {
        let txn = self.db.begin().await?;
        let now = Utc::now().into();
        let user_id = Uuid::new_v4();

        let user = users::ActiveModel {
            id: Set(user_id),
            first_name: Set(first_name.to_string()),
            last_name: Set(last_name.to_string()),
            email: Set(email.to_lowercase()),
            password_hash: Set(password_hash.to_string()),
            reset_token_hash: Set(None),
            reset_token_expires_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let user = user.insert(&txn).await?;

        let wallet = wallets::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            balance: Set(rust_decimal::Decimal::ZERO),
            created_at: Set(now),
            updated_at: Set(now),
        };
        wallet.insert(&txn).await?;

        txn.commit().await?;
        Ok(user)
    }

    /// Finds a user by email (case-insensitive via lowercased storage).
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::Email.eq(email.to_lowercase()))
            .one(&self.db)
            .await
    }

    /// Finds a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find_by_id(id).one(&self.db).await
    }

    /// Checks if an email is already registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn email_exists(&self, email: &str) -> Result<bool, DbErr> {
        let count = users::Entity::find()
            .filter(users::Column::Email.eq(email.to_lowercase()))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    /// Stores a password-reset token digest and its expiry on the user.
    ///
    /// Only the SHA-256 digest is stored; the plaintext token travels by
    /// email and is never persisted.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn set_reset_token(
        &self,
        user_id: Uuid,
        token_hash: &str,
        expires_at: chrono::DateTime<Utc>,
    ) -> Result<(), DbErr> {
        let user = users::Entity::find_by_id(user_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("user {user_id}")))?;

        let mut active = user.into_active_model();
        active.reset_token_hash = Set(Some(token_hash.to_string()));
        active.reset_token_expires_at = Set(Some(expires_at.into()));
        active.update(&self.db).await?;

        Ok(())
    }

    /// Finds the user holding an unexpired reset token with this digest.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_valid_reset_token(
        &self,
        token_hash: &str,
    ) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::ResetTokenHash.eq(token_hash))
            .filter(users::Column::ResetTokenExpiresAt.gt(Utc::now()))
            .one(&self.db)
            .await
    }

    /// Replaces the password hash and clears any outstanding reset token.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn update_password_and_clear_token(
        &self,
        user: users::Model,
        new_password_hash: &str,
    ) -> Result<users::Model, DbErr> {
        let mut active = user.into_active_model();
        active.password_hash = Set(new_password_hash.to_string());
        active.reset_token_hash = Set(None);
        active.reset_token_expires_at = Set(None);
        active.update(&self.db).await
    }

    /// Applies a partial profile update, touching only the provided fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn update_profile(
        &self,
        user: users::Model,
        input: UpdateProfileInput,
    ) -> Result<users::Model, DbErr> {
        // An update with no dirty columns would fail with RecordNotUpdated.
        if input.first_name.is_none()
            && input.last_name.is_none()
            && input.email.is_none()
            && input.password_hash.is_none()
        {
            return Ok(user);
        }
        let mut active = user.into_active_model();
        if let Some(first_name) = input.first_name {
            active.first_name = Set(first_name);
        }
        if let Some(last_name) = input.last_name {
            active.last_name = Set(last_name);
        }
        if let Some(email) = input.email {
            active.email = Set(email.to_lowercase());
        }
        if let Some(password_hash) = input.password_hash {
            active.password_hash = Set(password_hash);
        }
        active.update(&self.db).await
    }
}
