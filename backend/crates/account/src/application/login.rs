//! Login Use Case
//!
//! Authenticates with email + password and opens a session.

use std::sync::Arc;

use platform::client::ClientInfo;

use crate::application::AuthenticatedOutput;
use crate::application::config::AccountConfig;
use crate::application::session_token::open_session;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::{email::Email, user_password::RawPassword};
use crate::error::{AccountError, AccountResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login use case
pub struct LoginUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    config: Arc<AccountConfig>,
}

impl<U, S> LoginUseCase<U, S>
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

    pub async fn execute(
        &self,
        input: LoginInput,
        client: &ClientInfo,
    ) -> AccountResult<AuthenticatedOutput> {
        if input.email.trim().is_empty() || input.password.is_empty() {
            return Err(AccountError::MissingCredentials);
        }

        // A malformed address cannot belong to any account
        let email = Email::new(input.email).map_err(|_| AccountError::UnknownEmail)?;
        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AccountError::UnknownEmail)?;

        let raw_password = RawPassword::for_verification(input.password);
        if !user.verify_password(&raw_password, self.config.pepper()) {
            tracing::warn!(user_id = %user.user_id, "Login with wrong password");
            return Err(AccountError::InvalidCredentials);
        }

        let session_token =
            open_session(self.session_repo.as_ref(), &self.config, user.user_id, client).await?;

        tracing::info!(
            user_id = %user.user_id,
            client_ip = ?client.ip,
            "User logged in"
        );

        Ok(AuthenticatedOutput {
            user,
            session_token,
        })
    }
}
