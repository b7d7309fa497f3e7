//! HTTP Handlers

use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use std::sync::Arc;

use platform::cookie::extract_cookie;

use crate::application::config::AccountConfig;
use crate::application::{
    AuthenticatedOutput, ForgotPasswordUseCase, GetProfileUseCase, LoginInput, LoginUseCase,
    LogoutUseCase, RegisterInput, RegisterUseCase, ResetPasswordInput, ResetPasswordUseCase,
    UpdatePasswordInput, UpdatePasswordUseCase, UpdateProfileInput, UpdateProfileUseCase,
};
use crate::domain::ports::{Mailer, MediaStore};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::error::{AccountError, AccountResult};
use crate::presentation::dto::{
    ApiResponse, ForgotPasswordRequest, LoginRequest, ResetPasswordRequest,
    UpdatePasswordRequest,
};
use crate::presentation::extract::{Client, MultipartForm, json_body};
use crate::presentation::middleware::CurrentSession;

/// Shared state for account handlers
pub struct AccountAppState<R, M, N>
where
    R: UserRepository + SessionRepository + Send + Sync + 'static,
    M: MediaStore + Send + Sync + 'static,
    N: Mailer + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub media: Arc<M>,
    pub mailer: Arc<N>,
    pub config: Arc<AccountConfig>,
}

impl<R, M, N> AccountAppState<R, M, N>
where
    R: UserRepository + SessionRepository + Send + Sync + 'static,
    M: MediaStore + Send + Sync + 'static,
    N: Mailer + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>, media: Arc<M>, mailer: Arc<N>, config: AccountConfig) -> Self {
        Self {
            repo,
            media,
            mailer,
            config: Arc::new(config),
        }
    }
}

// Manual impl: only the Arcs are cloned, the adapters need not be Clone.
impl<R, M, N> Clone for AccountAppState<R, M, N>
where
    R: UserRepository + SessionRepository + Send + Sync + 'static,
    M: MediaStore + Send + Sync + 'static,
    N: Mailer + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            media: self.media.clone(),
            mailer: self.mailer.clone(),
            config: self.config.clone(),
        }
    }
}

// ============================================================================
// Register
// ============================================================================

/// POST /register (multipart)
pub async fn register<R, M, N>(
    State(state): State<AccountAppState<R, M, N>>,
    Client(client): Client,
    multipart: Result<Multipart, MultipartRejection>,
) -> AccountResult<impl IntoResponse>
where
    R: UserRepository + SessionRepository + Send + Sync + 'static,
    M: MediaStore + Send + Sync + 'static,
    N: Mailer + Send + Sync + 'static,
{
    // Not a multipart body at all means no files were sent
    let multipart = multipart.map_err(|_| AccountError::MissingUploads)?;
    let mut form = MultipartForm::read(multipart).await?;

    let input = RegisterInput {
        full_name: form.take_text("fullName").unwrap_or_default(),
        email: form.take_text("email").unwrap_or_default(),
        phone: form.take_text("phone").unwrap_or_default(),
        about_me: form.take_text("aboutMe").unwrap_or_default(),
        password: form.take_text("password").unwrap_or_default(),
        links: form.take_links(),
        avatar: form.take_file("avatar"),
        resume: form.take_file("resume"),
    };

    let use_case = RegisterUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.media.clone(),
        state.config.clone(),
    );
    let output = use_case.execute(input, &client).await?;

    Ok(signed_in(&state.config, StatusCode::CREATED, "Registered!", output))
}

// ============================================================================
// Login / Logout
// ============================================================================

/// POST /login
pub async fn login<R, M, N>(
    State(state): State<AccountAppState<R, M, N>>,
    Client(client): Client,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AccountResult<impl IntoResponse>
where
    R: UserRepository + SessionRepository + Send + Sync + 'static,
    M: MediaStore + Send + Sync + 'static,
    N: Mailer + Send + Sync + 'static,
{
    let req = json_body(payload)?;

    let use_case = LoginUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());
    let output = use_case
        .execute(
            LoginInput {
                email: req.email,
                password: req.password,
            },
            &client,
        )
        .await?;

    Ok(signed_in(&state.config, StatusCode::OK, "Login Successfully!", output))
}

/// GET /logout
pub async fn logout<R, M, N>(
    State(state): State<AccountAppState<R, M, N>>,
    headers: HeaderMap,
) -> AccountResult<impl IntoResponse>
where
    R: UserRepository + SessionRepository + Send + Sync + 'static,
    M: MediaStore + Send + Sync + 'static,
    N: Mailer + Send + Sync + 'static,
{
    if let Some(token) = extract_cookie(&headers, &state.config.session_cookie_name) {
        let use_case = LogoutUseCase::new(state.repo.clone(), state.config.clone());
        // The cookie is cleared either way
        if let Err(e) = use_case.execute(&token).await {
            tracing::warn!(error = %e, "Failed to revoke session on logout");
        }
    }

    let cookie = state.config.session_cookie().build_delete_cookie();

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(ApiResponse::message("Logged Out!")),
    ))
}

// ============================================================================
// Profile
// ============================================================================

/// GET /me
pub async fn get_me<R, M, N>(
    State(state): State<AccountAppState<R, M, N>>,
    Extension(current): Extension<CurrentSession>,
) -> AccountResult<Json<ApiResponse>>
where
    R: UserRepository + SessionRepository + Send + Sync + 'static,
    M: MediaStore + Send + Sync + 'static,
    N: Mailer + Send + Sync + 'static,
{
    let use_case = GetProfileUseCase::new(state.repo.clone(), state.config.clone());
    let user = use_case.execute(&current.user_id).await?;

    Ok(Json(ApiResponse::user(&user)))
}

/// PUT /me/profile/update (multipart)
pub async fn update_profile<R, M, N>(
    State(state): State<AccountAppState<R, M, N>>,
    Extension(current): Extension<CurrentSession>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AccountResult<Json<ApiResponse>>
where
    R: UserRepository + SessionRepository + Send + Sync + 'static,
    M: MediaStore + Send + Sync + 'static,
    N: Mailer + Send + Sync + 'static,
{
    let multipart = multipart.map_err(|e| AccountError::InvalidUpload(e.body_text()))?;
    let mut form = MultipartForm::read(multipart).await?;

    let input = UpdateProfileInput {
        full_name: form.take_text("fullName"),
        email: form.take_text("email"),
        phone: form.take_text("phone"),
        about_me: form.take_text("aboutMe"),
        links: form.take_links(),
        avatar: form.take_file("avatar"),
        resume: form.take_file("resume"),
    };

    let use_case = UpdateProfileUseCase::new(state.repo.clone(), state.media.clone());
    let user = use_case.execute(&current.user_id, input).await?;

    Ok(Json(ApiResponse::message_with_user("Profile Updated!", &user)))
}

/// GET /portfolio/me
pub async fn portfolio_user<R, M, N>(
    State(state): State<AccountAppState<R, M, N>>,
) -> AccountResult<Json<ApiResponse>>
where
    R: UserRepository + SessionRepository + Send + Sync + 'static,
    M: MediaStore + Send + Sync + 'static,
    N: Mailer + Send + Sync + 'static,
{
    let use_case = GetProfileUseCase::new(state.repo.clone(), state.config.clone());
    let user = use_case.portfolio_user().await?;

    Ok(Json(ApiResponse::user(&user)))
}

// ============================================================================
// Password
// ============================================================================

/// PUT /password/update
pub async fn update_password<R, M, N>(
    State(state): State<AccountAppState<R, M, N>>,
    Extension(current): Extension<CurrentSession>,
    payload: Result<Json<UpdatePasswordRequest>, JsonRejection>,
) -> AccountResult<Json<ApiResponse>>
where
    R: UserRepository + SessionRepository + Send + Sync + 'static,
    M: MediaStore + Send + Sync + 'static,
    N: Mailer + Send + Sync + 'static,
{
    let req = json_body(payload)?;

    let use_case =
        UpdatePasswordUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());
    use_case
        .execute(
            &current.user_id,
            &current.session_id,
            UpdatePasswordInput {
                current_password: req.current_password,
                new_password: req.new_password,
                confirm_new_password: req.confirm_new_password,
            },
        )
        .await?;

    Ok(Json(ApiResponse::message("Password Updated!")))
}

/// POST /password/forgot
pub async fn forgot_password<R, M, N>(
    State(state): State<AccountAppState<R, M, N>>,
    payload: Result<Json<ForgotPasswordRequest>, JsonRejection>,
) -> AccountResult<Json<ApiResponse>>
where
    R: UserRepository + SessionRepository + Send + Sync + 'static,
    M: MediaStore + Send + Sync + 'static,
    N: Mailer + Send + Sync + 'static,
{
    let req = json_body(payload)?;

    let use_case =
        ForgotPasswordUseCase::new(state.repo.clone(), state.mailer.clone(), state.config.clone());
    let email = use_case.execute(req.email).await?;

    Ok(Json(ApiResponse::message(format!(
        "Email sent to {email} successfully"
    ))))
}

/// PUT /password/reset/{token}
pub async fn reset_password<R, M, N>(
    State(state): State<AccountAppState<R, M, N>>,
    Path(token): Path<String>,
    Client(client): Client,
    payload: Result<Json<ResetPasswordRequest>, JsonRejection>,
) -> AccountResult<impl IntoResponse>
where
    R: UserRepository + SessionRepository + Send + Sync + 'static,
    M: MediaStore + Send + Sync + 'static,
    N: Mailer + Send + Sync + 'static,
{
    let req = json_body(payload)?;

    let use_case =
        ResetPasswordUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());
    let output = use_case
        .execute(
            &token,
            ResetPasswordInput {
                password: req.password,
                confirm_password: req.confirm_password,
            },
            &client,
        )
        .await?;

    Ok(signed_in(
        &state.config,
        StatusCode::OK,
        "Reset Password Successfully!",
        output,
    ))
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Response for operations that end with a fresh session
fn signed_in(
    config: &AccountConfig,
    status: StatusCode,
    message: &str,
    output: AuthenticatedOutput,
) -> impl IntoResponse + use<> {
    let cookie = config.session_cookie().build_set_cookie(&output.session_token);

    (
        status,
        [(header::SET_COOKIE, cookie)],
        Json(ApiResponse::message_with_user(message, &output.user)),
    )
}
