//! Application Configuration
//!
//! Configuration for the Account application layer.

use std::time::Duration;

use kernel::id::UserId;
use platform::cookie::CookieConfig;

use crate::error::{AccountError, AccountResult};

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Account application configuration
#[derive(Debug, Clone)]
pub struct AccountConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// Session secret key for HMAC signing (32 bytes)
    pub session_secret: [u8; 32],
    /// Session lifetime, also the cookie Max-Age (1 week)
    pub session_ttl: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Lifetime of an emailed reset token (15 minutes)
    pub reset_token_ttl: Duration,
    /// Base URL of the dashboard front end; reset links point here
    pub dashboard_url: String,
    /// Account served by the public portfolio endpoint
    pub portfolio_user_id: Option<UserId>,
    /// Request body cap for multipart uploads
    pub max_upload_bytes: usize,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "token".to_string(),
            session_secret: [0u8; 32],
            session_ttl: Duration::from_secs(7 * 24 * 3600),
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            password_pepper: None,
            reset_token_ttl: Duration::from_secs(15 * 60),
            dashboard_url: "http://localhost:5173".to_string(),
            portfolio_user_id: None,
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

impl AccountConfig {
    /// Create config with a random session secret (for development)
    pub fn with_random_secret() -> Self {
        let mut secret = [0u8; 32];
        secret.copy_from_slice(&platform::crypto::random_bytes(32));
        Self {
            session_secret: secret,
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    pub fn session_ttl_delta(&self) -> AccountResult<chrono::Duration> {
        chrono::Duration::from_std(self.session_ttl)
            .map_err(|e| AccountError::Internal(format!("Invalid session TTL: {e}")))
    }

    pub fn reset_token_ttl_delta(&self) -> AccountResult<chrono::Duration> {
        chrono::Duration::from_std(self.reset_token_ttl)
            .map_err(|e| AccountError::Internal(format!("Invalid reset token TTL: {e}")))
    }

    /// Cookie attributes for the session cookie
    pub fn session_cookie(&self) -> CookieConfig {
        CookieConfig {
            name: self.session_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            max_age_secs: Some(self.session_ttl.as_secs()),
        }
    }

    /// Link the user follows to pick a new password
    pub fn reset_url(&self, token: &str) -> String {
        format!(
            "{}/password/reset/{}",
            self.dashboard_url.trim_end_matches('/'),
            token
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AccountConfig::default();

        assert_eq!(config.session_cookie_name, "token");
        assert_eq!(config.session_ttl, Duration::from_secs(604_800));
        assert_eq!(config.reset_token_ttl, Duration::from_secs(900));
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
        assert!(config.cookie_secure);
        assert!(config.portfolio_user_id.is_none());
    }

    #[test]
    fn test_random_secret_and_development() {
        let a = AccountConfig::with_random_secret();
        let b = AccountConfig::with_random_secret();
        assert_ne!(a.session_secret, b.session_secret);

        let dev = AccountConfig::development();
        assert!(!dev.cookie_secure);
        assert!(dev.session_secret.iter().any(|&b| b != 0));
    }

    #[test]
    fn test_session_cookie_max_age_matches_ttl() {
        let cookie = AccountConfig::default()
            .session_cookie()
            .build_set_cookie("abc");
        assert!(cookie.starts_with("token=abc"));
        assert!(cookie.contains("Max-Age=604800"));
    }

    #[test]
    fn test_reset_url() {
        let config = AccountConfig {
            dashboard_url: "https://dash.example.com/".to_string(),
            ..AccountConfig::default()
        };
        assert_eq!(
            config.reset_url("abcd"),
            "https://dash.example.com/password/reset/abcd"
        );
    }
}
