//! User Password Value Object
//!
//! Domain wrappers around `platform::password`.
//!
//! ```rust
//! use account::domain::value_object::user_password::{RawPassword, UserPassword};
//!
//! let raw = RawPassword::new("Portfolio#2024!".to_string()).unwrap();
//! let hashed = UserPassword::from_raw(&raw, None).unwrap();
//! assert!(hashed.verify(&raw, None));
//! ```

use kernel::error::app_error::{AppError, AppResult};
use platform::password::{
    ClearTextPassword, HashedPassword, PasswordHashError, PasswordPolicyError,
};
use std::fmt;

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Password as typed by the user. Zeroized on drop.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Accept a new password (registration, change, reset).
    ///
    /// Applies the policy: 8..=128 code points after NFKC, no control
    /// characters, no common patterns.
    pub fn new(raw: String) -> AppResult<Self> {
        let clear_text = ClearTextPassword::new(raw).map_err(|e| match e {
            PasswordPolicyError::TooShort { min, actual } => AppError::bad_request(format!(
                "Password must be at least {} characters (got {})",
                min, actual
            ))
            .with_action("Please choose a longer password"),

            PasswordPolicyError::TooLong { max, actual } => AppError::bad_request(format!(
                "Password must be at most {} characters (got {})",
                max, actual
            ))
            .with_action("Please choose a shorter password"),

            PasswordPolicyError::EmptyOrWhitespace => {
                AppError::bad_request("Password cannot be empty")
                    .with_action("Please enter a password")
            }

            PasswordPolicyError::InvalidCharacter => {
                AppError::bad_request("Password contains invalid characters")
                    .with_action("Please remove any special control characters")
            }

            PasswordPolicyError::CommonPattern => {
                AppError::bad_request("Password is too common or follows a predictable pattern")
                    .with_action("Please choose a more unique password")
            }
        })?;

        Ok(Self(clear_text))
    }

    /// Wrap a submitted password for comparison only (login, current password).
    pub fn for_verification(raw: String) -> Self {
        Self(ClearTextPassword::for_verification(raw))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Argon2id PHC string, safe to store.
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash a raw password with the optional application pepper
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AppResult<Self> {
        let hashed = raw.inner().hash(pepper).map_err(|e| match e {
            PasswordHashError::HashingFailed(_) => {
                AppError::internal("Password hashing failed").with_source(e)
            }
            PasswordHashError::InvalidHashFormat => {
                AppError::internal("Unexpected error during password hashing")
            }
        })?;

        Ok(Self(hashed))
    }

    /// Load from the PHC string stored in the database
    pub fn from_phc_string(phc_string: impl Into<String>) -> AppResult<Self> {
        let hashed = HashedPassword::from_phc_string(phc_string)
            .map_err(|e| AppError::internal("Invalid password hash in database").with_source(e))?;

        Ok(Self(hashed))
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// `pepper` must match the one used during hashing.
    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(raw.inner(), pepper)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::password::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};

    #[test]
    fn test_raw_password_validation() {
        assert!(RawPassword::new("Portfolio#2024!".to_string()).is_ok());

        let short = "a1".repeat(MIN_PASSWORD_LENGTH / 2 - 1);
        assert_eq!(RawPassword::new(short).unwrap_err().status_code(), 400);

        let long = "a1".repeat(MAX_PASSWORD_LENGTH);
        assert!(RawPassword::new(long).is_err());

        assert!(RawPassword::new("password123".to_string()).is_err());
        assert!(RawPassword::new(String::new()).is_err());
    }

    #[test]
    fn test_hash_and_verify() {
        let raw = RawPassword::new("Portfolio#2024!".to_string()).unwrap();
        let hashed = UserPassword::from_raw(&raw, Some(b"pepper")).unwrap();

        assert!(hashed.verify(&raw, Some(b"pepper")));
        assert!(!hashed.verify(&raw, None));

        let wrong = RawPassword::for_verification("Portfolio#2025!".to_string());
        assert!(!hashed.verify(&wrong, Some(b"pepper")));
    }

    #[test]
    fn test_phc_roundtrip_and_garbage() {
        let raw = RawPassword::new("Portfolio#2024!".to_string()).unwrap();
        let hashed = UserPassword::from_raw(&raw, None).unwrap();
        let loaded = UserPassword::from_phc_string(hashed.as_phc_string()).unwrap();
        assert!(loaded.verify(&raw, None));

        let err = UserPassword::from_phc_string("plaintext").unwrap_err();
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn test_debug_is_redacted() {
        let raw = RawPassword::for_verification("hunter2hunter2".to_string());
        assert!(!format!("{raw:?}").contains("hunter2"));
        assert!(raw.inner().is_empty() == raw.is_empty());
    }
}
