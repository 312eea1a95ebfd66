//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod booking;
pub mod customer_query;
pub mod listing;
pub mod notification;
pub mod review;
pub mod transaction;
pub mod user;
pub mod wallet;
pub mod wishlist;

pub use booking::{BookingRepository, BookingWithListing, CreateBookingInput, UpdateBookingInput};
pub use customer_query::CustomerQueryRepository;
pub use listing::{CreateListingInput, ListingRepository, ListingWithOwner, UpdateListingInput};
pub use notification::NotificationRepository;
pub use review::{ReviewRepository, ReviewStats, ReviewWithAuthor};
pub use transaction::TransactionRepository;
pub use user::{UpdateProfileInput, UserRepository};
pub use wallet::WalletRepository;
pub use wishlist::WishlistRepository;
