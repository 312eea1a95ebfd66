//! Password reset tokens.
//!
//! A random token is mailed to the user; only its SHA-256 digest is stored.
//! Presented tokens are re-hashed and compared against the stored digest.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use sha2::{Digest, Sha256};

/// How long a reset token stays valid.
pub const RESET_TOKEN_TTL: Duration = Duration::hours(1);

/// Number of random bytes in a reset token (40 hex chars).
const TOKEN_BYTES: usize = 20;

/// A freshly generated reset token and its storable digest.
#[derive(Debug, Clone)]
pub struct ResetToken {
    /// The plaintext token to put in the emailed link. Never stored.
    pub token: String,
    /// SHA-256 hex digest of the token, stored on the user record.
    pub token_hash: String,
    /// When the token expires.
    pub expires_at: DateTime<Utc>,
}

impl ResetToken {
    /// Generates a new random token valid for [`RESET_TOKEN_TTL`].
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0u8; TOKEN_BYTES];
        rand::rng().fill(&mut bytes);

        let token: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
        let token_hash = hash_reset_token(&token);

        Self {
            token,
            token_hash,
            expires_at: Utc::now() + RESET_TOKEN_TTL,
        }
    }
}

/// Hashes a presented reset token for lookup against the stored digest.
#[must_use]
pub fn hash_reset_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_is_hex_of_expected_length() {
        let reset = ResetToken::generate();
        assert_eq!(reset.token.len(), TOKEN_BYTES * 2);
        assert!(reset.token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_hash_matches_generated_digest() {
        let reset = ResetToken::generate();
        assert_eq!(hash_reset_token(&reset.token), reset.token_hash);
    }

    #[test]
    fn test_tokens_are_unique() {
        assert_ne!(ResetToken::generate().token, ResetToken::generate().token);
    }

    #[test]
    fn test_expiry_is_in_the_future() {
        let reset = ResetToken::generate();
        assert!(reset.expires_at > Utc::now());
    }
}
