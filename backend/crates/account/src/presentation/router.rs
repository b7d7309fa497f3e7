//! Account Router

use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;

use crate::application::config::AccountConfig;
use crate::domain::ports::{Mailer, MediaStore};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::infra::cloudinary::CloudinaryMediaStore;
use crate::infra::postgres::PgAccountRepository;
use crate::infra::smtp::SmtpMailer;
use crate::presentation::handlers::{self, AccountAppState};
use crate::presentation::middleware::require_session;

/// Create the account router with the production adapters
pub fn account_router(
    repo: PgAccountRepository,
    media: CloudinaryMediaStore,
    mailer: SmtpMailer,
    config: AccountConfig,
) -> Router {
    let state = AccountAppState::new(Arc::new(repo), Arc::new(media), Arc::new(mailer), config);
    account_router_generic(state)
}

/// Create the account router for any adapter implementation
pub fn account_router_generic<R, M, N>(state: AccountAppState<R, M, N>) -> Router
where
    R: UserRepository + SessionRepository + Send + Sync + 'static,
    M: MediaStore + Send + Sync + 'static,
    N: Mailer + Send + Sync + 'static,
{
    let body_limit = state.config.max_upload_bytes;

    let protected = Router::new()
        .route("/me", get(handlers::get_me::<R, M, N>))
        .route("/me/profile/update", put(handlers::update_profile::<R, M, N>))
        .route("/password/update", put(handlers::update_password::<R, M, N>))
        .route_layer(from_fn_with_state(
            state.clone(),
            require_session::<R, M, N>,
        ));

    Router::new()
        .route("/register", post(handlers::register::<R, M, N>))
        .route("/login", post(handlers::login::<R, M, N>))
        .route("/logout", get(handlers::logout::<R, M, N>))
        .route("/portfolio/me", get(handlers::portfolio_user::<R, M, N>))
        .route("/password/forgot", post(handlers::forgot_password::<R, M, N>))
        .route(
            "/password/reset/{token}",
            put(handlers::reset_password::<R, M, N>),
        )
        .merge(protected)
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
