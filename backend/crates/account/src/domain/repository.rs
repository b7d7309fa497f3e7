//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use chrono::{DateTime, Utc};
use kernel::id::{SessionId, UserId};

use crate::domain::entity::{session::Session, user::User};
use crate::domain::value_object::email::Email;
use crate::domain::value_object::user_password::UserPassword;
use crate::error::AccountResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user. A taken email yields `AccountError::EmailTaken`.
    async fn create(&self, user: &User) -> AccountResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AccountResult<Option<User>>;

    /// Find user by (normalized) email
    async fn find_by_email(&self, email: &Email) -> AccountResult<Option<User>>;

    /// Check if email exists
    async fn exists_by_email(&self, email: &Email) -> AccountResult<bool>;

    /// User holding this reset token hash whose deadline is after `now`
    async fn find_by_reset_token(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> AccountResult<Option<User>>;

    /// Persist profile text, links and media. Credentials and reset state
    /// are left alone. A taken email yields `AccountError::EmailTaken`.
    async fn update_profile(&self, user: &User) -> AccountResult<()>;

    /// Persist the password hash only
    async fn update_password(&self, user: &User) -> AccountResult<()>;

    /// Persist the reset token hash and deadline only
    async fn save_reset_token(&self, user: &User) -> AccountResult<()>;

    /// Clear the reset state, but only while `token_hash` is still the
    /// outstanding token
    async fn clear_reset_token(&self, user_id: &UserId, token_hash: &str) -> AccountResult<()>;

    /// Swap in `password` and clear the reset state in one step, provided
    /// `token_hash` is outstanding and unexpired at `now`. `None` when it
    /// is not, including when another request consumed it first.
    async fn consume_reset_token(
        &self,
        token_hash: &str,
        password: &UserPassword,
        now: DateTime<Utc>,
    ) -> AccountResult<Option<User>>;
}

/// Session repository trait
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    /// Create a new session
    async fn create(&self, session: &Session) -> AccountResult<()>;

    /// Find session by ID
    async fn find_by_id(&self, session_id: &SessionId) -> AccountResult<Option<Session>>;

    /// Update session (last activity)
    async fn update(&self, session: &Session) -> AccountResult<()>;

    /// Delete a session
    async fn delete(&self, session_id: &SessionId) -> AccountResult<()>;

    /// Delete all sessions for a user (except one, if given)
    async fn delete_all_for_user(
        &self,
        user_id: &UserId,
        except: Option<&SessionId>,
    ) -> AccountResult<u64>;
}
