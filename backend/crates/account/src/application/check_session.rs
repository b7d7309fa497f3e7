//! Check Session Use Case
//!
//! Verifies a cookie token and loads the session behind it.

use std::sync::Arc;

use crate::application::config::AccountConfig;
use crate::application::session_token::parse_session_token;
use crate::domain::entity::session::Session;
use crate::domain::repository::SessionRepository;
use crate::error::{AccountError, AccountResult};

/// Check session use case
pub struct CheckSessionUseCase<S>
where
    S: SessionRepository + Send + Sync + 'static,
{
    session_repo: Arc<S>,
    config: Arc<AccountConfig>,
}

impl<S> CheckSessionUseCase<S>
where
    S: SessionRepository + Send + Sync + 'static,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AccountConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    /// Get session and update last activity
    pub async fn execute(&self, session_token: &str) -> AccountResult<Session> {
        let session_id = parse_session_token(session_token, &self.config.session_secret)?;

        let mut session = self
            .session_repo
            .find_by_id(&session_id)
            .await?
            .ok_or(AccountError::SessionInvalid)?;

        if session.is_expired() {
            self.session_repo.delete(&session_id).await?;
            return Err(AccountError::SessionInvalid);
        }

        session.touch();
        tracing::debug!(
            session_id = %session.session_id,
            remaining_ms = session.remaining_ms(),
            "Session verified"
        );

        // Update in background
        let session_clone = session.clone();
        let repo = self.session_repo.clone();
        tokio::spawn(async move {
            if let Err(e) = repo.update(&session_clone).await {
                tracing::warn!(error = %e, "Failed to update session activity");
            }
        });

        Ok(session)
    }
}
