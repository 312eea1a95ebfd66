//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - Repository abstractions for data access
//! - Database migrations
//!
//! The booking repository is the orchestration point of the system: it is the
//! only place where listing resolution, availability checking, wallet
//! settlement, and booking persistence are sequenced, inside one database
//! transaction.

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::{
    BookingRepository, CustomerQueryRepository, ListingRepository, NotificationRepository,
    ReviewRepository, TransactionRepository, UserRepository, WalletRepository,
    WishlistRepository,
};

use sea_orm::{Database, DatabaseConnection, DbErr};

/// Establishes a connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}
