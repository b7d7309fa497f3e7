//! Update Password Use Case
//!
//! Changes the password of the signed-in user after re-checking the current one.

use std::sync::Arc;

use kernel::id::{SessionId, UserId};

use crate::application::config::AccountConfig;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::user_password::{RawPassword, UserPassword};
use crate::error::{AccountError, AccountResult};

/// Update password input
pub struct UpdatePasswordInput {
    pub current_password: String,
    pub new_password: String,
    pub confirm_new_password: String,
}

/// Update password use case
pub struct UpdatePasswordUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    config: Arc<AccountConfig>,
}

impl<U, S> UpdatePasswordUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    pub fn new(user_repo: Arc<U>, session_repo: Arc<S>, config: Arc<AccountConfig>) -> Self {
        Self {
            user_repo,
            session_repo,
            config,
        }
    }

    /// Every other session of the user is revoked; `current_session` survives.
    pub async fn execute(
        &self,
        user_id: &UserId,
        current_session: &SessionId,
        input: UpdatePasswordInput,
    ) -> AccountResult<()> {
        if input.current_password.is_empty()
            || input.new_password.is_empty()
            || input.confirm_new_password.is_empty()
        {
            return Err(AccountError::MissingFields);
        }

        let mut user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AccountError::UserNotFound)?;

        let current = RawPassword::for_verification(input.current_password);
        if !user.verify_password(&current, self.config.pepper()) {
            return Err(AccountError::IncorrectCurrentPassword);
        }

        if input.new_password != input.confirm_new_password {
            return Err(AccountError::PasswordMismatch);
        }

        let new_password = RawPassword::new(input.new_password)?;
        user.set_password(UserPassword::from_raw(&new_password, self.config.pepper())?);
        self.user_repo.update_password(&user).await?;

        let revoked = self
            .session_repo
            .delete_all_for_user(user_id, Some(current_session))
            .await?;

        tracing::info!(
            user_id = %user_id,
            sessions_revoked = revoked,
            "Password updated"
        );

        Ok(())
    }
}
