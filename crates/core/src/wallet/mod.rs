//! Wallet ledger rules.
//!
//! One wallet per user, balance in decimal currency units. Every balance
//! mutation must be paired with a transaction-log entry of the matching kind;
//! the pairing itself is enforced at the persistence layer, the arithmetic
//! and rejection rules live here.

pub mod error;
pub mod service;

#[cfg(test)]
mod service_props;

pub use error::WalletError;
pub use service::{TransactionKind, WalletService};
