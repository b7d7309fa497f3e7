//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::user::User;
use crate::domain::value_object::media_asset::MediaAsset;

// ============================================================================
// Envelope
// ============================================================================

/// Success body shared by every endpoint.
/// Errors use the same shape with `success: false`.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
}

impl ApiResponse {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            user: None,
        }
    }

    pub fn user(user: &User) -> Self {
        Self {
            success: true,
            message: None,
            user: Some(UserResponse::from(user)),
        }
    }

    pub fn message_with_user(message: impl Into<String>, user: &User) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            user: Some(UserResponse::from(user)),
        }
    }
}

// ============================================================================
// User
// ============================================================================

/// Public view of a user. Never carries the password hash or reset state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub about_me: String,
    #[serde(rename = "portfolioURL", skip_serializing_if = "Option::is_none")]
    pub portfolio_url: Option<String>,
    #[serde(rename = "githubURL", skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(rename = "instagramURL", skip_serializing_if = "Option::is_none")]
    pub instagram_url: Option<String>,
    #[serde(rename = "twitterURL", skip_serializing_if = "Option::is_none")]
    pub twitter_url: Option<String>,
    #[serde(rename = "facebookURL", skip_serializing_if = "Option::is_none")]
    pub facebook_url: Option<String>,
    #[serde(rename = "linkedInURL", skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    pub avatar: MediaAsset,
    pub resume: MediaAsset,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.user_id.to_string(),
            full_name: user.full_name.as_str().to_string(),
            email: user.email.as_str().to_string(),
            phone: user.phone.as_str().to_string(),
            about_me: user.about_me.as_str().to_string(),
            portfolio_url: user.links.portfolio.clone(),
            github_url: user.links.github.clone(),
            instagram_url: user.links.instagram.clone(),
            twitter_url: user.links.twitter.clone(),
            facebook_url: user.links.facebook.clone(),
            linkedin_url: user.links.linkedin.clone(),
            avatar: user.avatar.clone(),
            resume: user.resume.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

// ============================================================================
// Requests
// ============================================================================
// Missing fields default to empty so the use cases report them as 400s.

/// Login request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Update password request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdatePasswordRequest {
    pub current_password: String,
    pub new_password: String,
    pub confirm_new_password: String,
}

/// Forgot password request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Reset password request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResetPasswordRequest {
    pub password: String,
    pub confirm_password: String,
}
