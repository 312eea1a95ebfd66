//! Shared value types.

pub mod money;

pub use money::{MONEY_SCALE, is_valid_amount, normalize};
