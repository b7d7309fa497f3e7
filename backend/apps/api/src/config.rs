//! Server Configuration
//!
//! Everything the binary needs, read once from the environment at startup.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use account::application::config::SameSite;
use account::{AccountConfig, CloudinaryConfig, SmtpConfig};
use anyhow::{Context, bail};
use axum::http::HeaderValue;
use base64::Engine;
use base64::engine::general_purpose;
use kernel::id::UserId;

const DEFAULT_PORT: u16 = 4000;
const DEFAULT_COOKIE_EXPIRE_DAYS: u64 = 7;
const DEFAULT_RESET_TOKEN_TTL_MINUTES: u64 = 15;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
const DEFAULT_SMTP_PORT: u16 = 465;

/// Startup configuration
#[derive(Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    pub cors_origins: Vec<HeaderValue>,
    pub account: AccountConfig,
    pub cloudinary: CloudinaryConfig,
    pub smtp: SmtpConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = required("DATABASE_URL")?;
        let port = parsed("PORT", DEFAULT_PORT)?;

        // Debug builds start from a random secret and an insecure cookie
        let defaults = if cfg!(debug_assertions) {
            AccountConfig::development()
        } else {
            AccountConfig::default()
        };

        let session_secret = match env::var("SESSION_SECRET") {
            Ok(encoded) => decode_secret(&encoded).context("SESSION_SECRET")?,
            Err(_) if cfg!(debug_assertions) => {
                tracing::warn!("SESSION_SECRET not set, using a random secret");
                defaults.session_secret
            }
            Err(_) => bail!("SESSION_SECRET must be set in production"),
        };

        let cookie_expire_days: u64 = parsed("COOKIE_EXPIRE", DEFAULT_COOKIE_EXPIRE_DAYS)?;
        let reset_ttl_minutes: u64 =
            parsed("RESET_TOKEN_TTL_MINUTES", DEFAULT_RESET_TOKEN_TTL_MINUTES)?;

        let cookie_same_site = match env::var("COOKIE_SAME_SITE") {
            Ok(value) => SameSite::from_str(&value).map_err(anyhow::Error::msg)?,
            Err(_) => SameSite::default(),
        };

        let portfolio_user_id = env::var("PORTFOLIO_USER_ID")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(|v| v.parse::<UserId>())
            .transpose()
            .context("PORTFOLIO_USER_ID")?;

        let dashboard_url = env::var("DASHBOARD_URL").unwrap_or(defaults.dashboard_url);

        let account = AccountConfig {
            session_secret,
            session_ttl: Duration::from_secs(cookie_expire_days * 24 * 3600),
            cookie_secure: parsed("COOKIE_SECURE", defaults.cookie_secure)?,
            cookie_same_site,
            password_pepper: env::var("PASSWORD_PEPPER").ok().map(String::into_bytes),
            reset_token_ttl: Duration::from_secs(reset_ttl_minutes * 60),
            dashboard_url: dashboard_url.clone(),
            portfolio_user_id,
            max_upload_bytes: parsed("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            ..defaults
        };

        // Both front ends are allowed by default
        let origins = env::var("CORS_ORIGINS").unwrap_or_else(|_| {
            let mut list = vec![dashboard_url];
            if let Ok(portfolio) = env::var("PORTFOLIO_URL") {
                list.push(portfolio);
            }
            list.join(",")
        });

        let cloudinary = CloudinaryConfig::new(
            required("CLOUDINARY_CLOUD_NAME")?,
            required("CLOUDINARY_API_KEY")?,
            required("CLOUDINARY_API_SECRET")?,
        );

        let smtp_mail = required("SMTP_MAIL")?;
        let smtp = SmtpConfig {
            host: required("SMTP_HOST")?,
            port: parsed("SMTP_PORT", DEFAULT_SMTP_PORT)?,
            username: smtp_mail.clone(),
            password: required("SMTP_PASSWORD")?,
            from: smtp_mail,
        };

        Ok(Self {
            database_url,
            port,
            cors_origins: parse_origins(&origins),
            account,
            cloudinary,
            smtp,
        })
    }
}

fn required(key: &str) -> anyhow::Result<String> {
    env::var(key).with_context(|| format!("{key} must be set in environment"))
}

fn parsed<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value")),
        Err(_) => Ok(default),
    }
}

/// Standard base64 of exactly 32 bytes
fn decode_secret(encoded: &str) -> anyhow::Result<[u8; 32]> {
    let bytes = general_purpose::STANDARD.decode(encoded.trim())?;
    bytes
        .try_into()
        .map_err(|b: Vec<u8>| anyhow::anyhow!("expected 32 bytes, got {}", b.len()))
}

/// Comma-separated origins; entries that are not valid header values are skipped
fn parse_origins(raw: &str) -> Vec<HeaderValue> {
    raw.split(',')
        .map(|origin| origin.trim().trim_end_matches('/'))
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| origin.parse().ok())
        .collect()
}
