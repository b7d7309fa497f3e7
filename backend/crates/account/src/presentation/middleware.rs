//! Session Middleware
//!
//! Guards the routes that act on the signed-in user.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use kernel::id::{SessionId, UserId};
use platform::cookie::extract_cookie;

use crate::application::CheckSessionUseCase;
use crate::domain::ports::{Mailer, MediaStore};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::error::AccountError;
use crate::presentation::handlers::AccountAppState;

/// Signed-in caller, stored in request extensions by [`require_session`]
#[derive(Debug, Clone, Copy)]
pub struct CurrentSession {
    pub session_id: SessionId,
    pub user_id: UserId,
}

/// Reject requests without a live session cookie
pub async fn require_session<R, M, N>(
    State(state): State<AccountAppState<R, M, N>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AccountError>
where
    R: UserRepository + SessionRepository + Send + Sync + 'static,
    M: MediaStore + Send + Sync + 'static,
    N: Mailer + Send + Sync + 'static,
{
    let token = extract_cookie(req.headers(), &state.config.session_cookie_name)
        .ok_or(AccountError::SessionInvalid)?;

    let use_case = CheckSessionUseCase::new(state.repo.clone(), state.config.clone());
    let session = use_case.execute(&token).await?;

    req.extensions_mut().insert(CurrentSession {
        session_id: session.session_id,
        user_id: session.user_id,
    });

    Ok(next.run(req).await)
}
