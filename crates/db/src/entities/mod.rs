//! `SeaORM` entity definitions.

pub mod bookings;
pub mod customer_queries;
pub mod listings;
pub mod notifications;
pub mod reviews;
pub mod sea_orm_active_enums;
pub mod transactions;
pub mod users;
pub mod wallets;
pub mod wishlists;
