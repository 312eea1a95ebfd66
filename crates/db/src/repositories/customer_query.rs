//! Customer-query repository for contact-form submissions.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, Set};
use uuid::Uuid;

use crate::entities::customer_queries;

/// Repository for contact-form submissions.
#[derive(Debug, Clone)]
pub struct CustomerQueryRepository {
    db: DatabaseConnection,
}

impl CustomerQueryRepository {
    /// Creates a new customer-query repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a contact-form submission, initially open.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create(
        &self,
        name: &str,
        email: &str,
        message: &str,
    ) -> Result<customer_queries::Model, DbErr> {
        let query = customer_queries::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            email: Set(email.to_string()),
            message: Set(message.to_string()),
            is_complete: Set(false),
            created_at: Set(Utc::now().into()),
        };

        query.insert(&self.db).await
    }
}
