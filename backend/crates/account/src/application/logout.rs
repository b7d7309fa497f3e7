//! Logout Use Case
//!
//! Revokes the session behind a cookie token.

use std::sync::Arc;

use crate::application::config::AccountConfig;
use crate::application::session_token::parse_session_token;
use crate::domain::repository::SessionRepository;
use crate::error::AccountResult;

/// Logout use case
pub struct LogoutUseCase<S>
where
    S: SessionRepository,
{
    session_repo: Arc<S>,
    config: Arc<AccountConfig>,
}

impl<S> LogoutUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AccountConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    /// A token that does not verify has nothing to revoke.
    pub async fn execute(&self, session_token: &str) -> AccountResult<()> {
        let Ok(session_id) = parse_session_token(session_token, &self.config.session_secret) else {
            return Ok(());
        };

        self.session_repo.delete(&session_id).await?;
        tracing::info!(session_id = %session_id, "User logged out");

        Ok(())
    }
}
