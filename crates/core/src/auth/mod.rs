//! Authentication primitives: password hashing and reset tokens.

pub mod password;
pub mod reset;

pub use password::{PasswordError, hash_password, verify_password};
pub use reset::{RESET_TOKEN_TTL, ResetToken, hash_reset_token};
