//! Password Reset Token
//!
//! 20 random bytes, hex encoded (40 chars). Only the SHA-256 of the token
//! is stored; the plaintext travels once, inside the emailed link.

use platform::crypto::{random_hex, sha256_hex};
use std::fmt;

/// Random bytes per token
pub const RESET_TOKEN_BYTES: usize = 20;

/// Hex length of a token
pub const RESET_TOKEN_LEN: usize = RESET_TOKEN_BYTES * 2;

/// Plaintext reset token
#[derive(Clone, PartialEq, Eq)]
pub struct ResetToken(String);

impl ResetToken {
    /// Fresh random token
    pub fn generate() -> Self {
        Self(random_hex(RESET_TOKEN_BYTES))
    }

    /// Accept a token from a URL. Anything that is not 40 hex chars is
    /// rejected before any lookup.
    pub fn parse(raw: &str) -> Option<Self> {
        (raw.len() == RESET_TOKEN_LEN && raw.bytes().all(|b| b.is_ascii_hexdigit()))
            .then(|| Self(raw.to_string()))
    }

    /// Value stored in `reset_password_token`
    pub fn hash(&self) -> String {
        sha256_hex(self.0.as_bytes())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ResetToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ResetToken").field(&"[REDACTED]").finish()
    }
}
