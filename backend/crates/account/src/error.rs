//! Account Error Types
//!
//! Account-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Account-specific result type alias
pub type AccountResult<T> = Result<T, AccountError>;

/// Account-specific error variants
#[derive(Debug, Error)]
pub enum AccountError {
    /// Registration needs both files
    #[error("Avatar and resume are required!")]
    MissingUploads,

    /// Uploaded file is unusable (wrong type, unreadable form)
    #[error("{0}")]
    InvalidUpload(String),

    /// Field-level validation failure from a value object
    #[error("{}", .0.message())]
    Validation(AppError),

    /// Login without email or password
    #[error("Provide email and password!")]
    MissingCredentials,

    /// Required form fields left empty
    #[error("Please fill all fields.")]
    MissingFields,

    /// Email already belongs to another account
    #[error("Email is already registered")]
    EmailTaken,

    /// User not found
    #[error("User not found!")]
    UserNotFound,

    /// Login with an email that has no account
    #[error("Invalid email or password!")]
    UnknownEmail,

    /// Login with the wrong password
    #[error("Invalid email or password!")]
    InvalidCredentials,

    /// Password change with the wrong current password
    #[error("Incorrect current password!")]
    IncorrectCurrentPassword,

    /// Password and its confirmation differ
    #[error("Password and confirm password do not match!")]
    PasswordMismatch,

    /// Reset token malformed, unknown, consumed or expired
    #[error("Reset password token is invalid or has been expired.")]
    ResetTokenInvalid,

    /// Session missing, forged or expired
    #[error("User not authenticated!")]
    SessionInvalid,

    /// Media host rejected or failed an upload
    #[error("Media upload failed: {0}")]
    MediaUpload(String),

    /// Mail relay failed
    #[error("Mail delivery failed: {0}")]
    MailDelivery(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AccountError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AccountError::MissingUploads
            | AccountError::InvalidUpload(_)
            | AccountError::MissingCredentials
            | AccountError::MissingFields
            | AccountError::IncorrectCurrentPassword
            | AccountError::PasswordMismatch
            | AccountError::ResetTokenInvalid => ErrorKind::BadRequest,
            AccountError::Validation(err) => err.kind(),
            AccountError::EmailTaken => ErrorKind::Conflict,
            AccountError::UserNotFound | AccountError::UnknownEmail => ErrorKind::NotFound,
            AccountError::InvalidCredentials | AccountError::SessionInvalid => {
                ErrorKind::Unauthorized
            }
            AccountError::MediaUpload(_) | AccountError::MailDelivery(_) => ErrorKind::BadGateway,
            AccountError::Database(_) | AccountError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    ///
    /// Upstream and internal details stay in the logs.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AccountError::Validation(err) => {
                let app_err = AppError::new(err.kind(), err.message().to_string());
                match err.action() {
                    Some(action) => app_err.with_action(action.to_string()),
                    None => app_err,
                }
            }
            AccountError::MediaUpload(_) => AppError::bad_gateway("Failed to upload files to media host")
                .with_action("Please try again later"),
            AccountError::MailDelivery(_) => AppError::bad_gateway("Failed to send email")
                .with_action("Please try again later"),
            AccountError::Database(_) | AccountError::Internal(_) => {
                AppError::internal("Internal Server Error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AccountError::Database(e) => {
                tracing::error!(error = %e, "Account database error");
            }
            AccountError::Internal(msg) => {
                tracing::error!(message = %msg, "Account internal error");
            }
            AccountError::MediaUpload(msg) => {
                tracing::error!(message = %msg, "Media host error");
            }
            AccountError::MailDelivery(msg) => {
                tracing::error!(message = %msg, "Mail relay error");
            }
            AccountError::InvalidCredentials | AccountError::IncorrectCurrentPassword => {
                tracing::warn!(error = %self, "Password check failed");
            }
            AccountError::ResetTokenInvalid => {
                tracing::warn!("Rejected password reset token");
            }
            _ => {
                tracing::debug!(error = %self, "Account error");
            }
        }
    }
}

impl IntoResponse for AccountError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AccountError {
    fn from(err: AppError) -> Self {
        if err.is_server_error() {
            // Keep the cause for the log line
            match std::error::Error::source(&err) {
                Some(source) => AccountError::Internal(format!("{err}: {source}")),
                None => AccountError::Internal(err.to_string()),
            }
        } else {
            AccountError::Validation(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AccountError::MissingUploads.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AccountError::EmailTaken.status_code(), StatusCode::CONFLICT);
        assert_eq!(AccountError::UnknownEmail.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AccountError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AccountError::IncorrectCurrentPassword.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AccountError::MediaUpload("timeout".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AccountError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_keeps_kind_and_action() {
        let err: AccountError = AppError::bad_request("Invalid email format")
            .with_action("Please enter a valid email address")
            .into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let app = err.to_app_error();
        assert_eq!(app.message(), "Invalid email format");
        assert_eq!(app.action(), Some("Please enter a valid email address"));
    }

    #[test]
    fn test_server_app_error_becomes_internal() {
        let err: AccountError = AppError::internal("hash failure").into();
        assert!(matches!(err, AccountError::Internal(_)));
    }

    #[test]
    fn test_upstream_details_are_hidden() {
        let app = AccountError::MediaUpload("api_secret mismatch".into()).to_app_error();
        assert!(!app.message().contains("api_secret"));
        assert_eq!(app.status_code(), 502);
    }
}
