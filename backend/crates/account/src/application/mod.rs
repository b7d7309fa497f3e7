//! Application Layer
//!
//! Use cases and application services.

pub mod check_session;
pub mod config;
pub mod login;
pub mod logout;
pub mod password_reset;
pub mod profile;
pub mod register;
pub mod session_token;
pub mod update_password;

// Re-exports
pub use check_session::CheckSessionUseCase;
pub use config::AccountConfig;
pub use login::{LoginInput, LoginUseCase};
pub use logout::LogoutUseCase;
pub use password_reset::{ForgotPasswordUseCase, ResetPasswordInput, ResetPasswordUseCase};
pub use profile::{GetProfileUseCase, UpdateProfileInput, UpdateProfileUseCase};
pub use register::{RegisterInput, RegisterUseCase};
pub use update_password::{UpdatePasswordInput, UpdatePasswordUseCase};

use crate::domain::entity::user::User;

/// Result of any operation that signs the user in
pub struct AuthenticatedOutput {
    pub user: User,
    /// Value for the session cookie
    pub session_token: String,
}
