//! Password Reset Use Cases
//!
//! Forgot: issue a reset token and email the link.
//! Reset: consume the token, set the new password, sign the user in.

use std::sync::Arc;

use chrono::Utc;
use kernel::error::app_error::AppError;
use platform::client::ClientInfo;

use crate::application::AuthenticatedOutput;
use crate::application::config::AccountConfig;
use crate::application::session_token::open_session;
use crate::domain::ports::{Mailer, OutgoingEmail};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::{
    email::Email,
    reset_token::ResetToken,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AccountError, AccountResult};

pub const RESET_EMAIL_SUBJECT: &str = "Personal Portfolio Dashboard Password Recovery";

fn reset_email_body(reset_url: &str) -> String {
    format!(
        "Your reset password link is:\n\n{reset_url}\n\n\
         It expires shortly and can be used once.\n\
         If you did not request this email, please ignore it."
    )
}

// ============================================================================
// Forgot Password
// ============================================================================

/// Forgot password use case
pub struct ForgotPasswordUseCase<U, N>
where
    U: UserRepository,
    N: Mailer,
{
    user_repo: Arc<U>,
    mailer: Arc<N>,
    config: Arc<AccountConfig>,
}

impl<U, N> ForgotPasswordUseCase<U, N>
where
    U: UserRepository,
    N: Mailer,
{
    pub fn new(user_repo: Arc<U>, mailer: Arc<N>, config: Arc<AccountConfig>) -> Self {
        Self {
            user_repo,
            mailer,
            config,
        }
    }

    /// Returns the address the link was sent to.
    pub async fn execute(&self, email: String) -> AccountResult<Email> {
        if email.trim().is_empty() {
            return Err(AppError::bad_request("Email is required").into());
        }
        let email = Email::new(email)?;

        let mut user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AccountError::UserNotFound)?;

        let token = user.issue_reset_token(self.config.reset_token_ttl_delta()?, Utc::now());
        self.user_repo.save_reset_token(&user).await?;

        let message = OutgoingEmail {
            to: user.email.to_string(),
            subject: RESET_EMAIL_SUBJECT.to_string(),
            body: reset_email_body(&self.config.reset_url(token.as_str())),
        };

        if let Err(e) = self.mailer.send(&message).await {
            // A token nobody received must not stay usable. A newer request
            // may already have replaced it, so only this one is cleared.
            if let Err(clear_err) = self
                .user_repo
                .clear_reset_token(&user.user_id, &token.hash())
                .await
            {
                tracing::error!(
                    user_id = %user.user_id,
                    error = %clear_err,
                    "Failed to clear reset token after mail failure"
                );
            }
            return Err(e);
        }

        tracing::info!(user_id = %user.user_id, "Password reset email sent");
        Ok(user.email)
    }
}

// ============================================================================
// Reset Password
// ============================================================================

/// Reset password input
pub struct ResetPasswordInput {
    pub password: String,
    pub confirm_password: String,
}

/// Reset password use case
pub struct ResetPasswordUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    config: Arc<AccountConfig>,
}

impl<U, S> ResetPasswordUseCase<U, S>
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

    /// Consumes the token, revokes every existing session and opens a new one.
    pub async fn execute(
        &self,
        token: &str,
        input: ResetPasswordInput,
        client: &ClientInfo,
    ) -> AccountResult<AuthenticatedOutput> {
        let token = ResetToken::parse(token).ok_or(AccountError::ResetTokenInvalid)?;
        let token_hash = token.hash();

        // A dead token is reported before any form error
        self.user_repo
            .find_by_reset_token(&token_hash, Utc::now())
            .await?
            .ok_or(AccountError::ResetTokenInvalid)?;

        if input.password != input.confirm_password {
            return Err(AccountError::PasswordMismatch);
        }
        let raw_password = RawPassword::new(input.password)?;
        let password = UserPassword::from_raw(&raw_password, self.config.pepper())?;

        // Only one request can win the token
        let user = self
            .user_repo
            .consume_reset_token(&token_hash, &password, Utc::now())
            .await?
            .ok_or(AccountError::ResetTokenInvalid)?;

        let revoked = self
            .session_repo
            .delete_all_for_user(&user.user_id, None)
            .await?;

        let session_token =
            open_session(self.session_repo.as_ref(), &self.config, user.user_id, client).await?;

        tracing::info!(
            user_id = %user.user_id,
            sessions_revoked = revoked,
            "Password reset"
        );

        Ok(AuthenticatedOutput {
            user,
            session_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_email_body_contains_link() {
        let body = reset_email_body("https://dash.example.com/password/reset/abc");
        assert!(body.contains("https://dash.example.com/password/reset/abc"));
        assert!(body.contains("ignore"));
    }
}
