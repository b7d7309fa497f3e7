//! Profile Text Value Objects
//!
//! Free-text profile fields: full name, phone number and the "about me" bio.
//! All are required, trimmed, and bounded in length.

use kernel::error::app_error::{AppError, AppResult};
use serde::Serialize;

pub const FULL_NAME_MAX_LENGTH: usize = 100;
pub const PHONE_MAX_LENGTH: usize = 30;
pub const ABOUT_ME_MAX_LENGTH: usize = 2000;

fn bounded(field: &str, raw: &str, max: usize) -> AppResult<String> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(AppError::bad_request(format!("{field} is required")));
    }
    if value.chars().count() > max {
        return Err(AppError::bad_request(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(value.to_string())
}

/// Display name of the portfolio owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FullName(String);

impl FullName {
    pub fn new(raw: &str) -> AppResult<Self> {
        let value = bounded("Full name", raw, FULL_NAME_MAX_LENGTH)?;
        if value.chars().any(char::is_control) {
            return Err(AppError::bad_request("Full name contains invalid characters"));
        }
        Ok(Self(value))
    }

    pub fn from_db(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Contact phone number
///
/// Digits plus the usual separators: space, `+`, `-`, `.`, parentheses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    pub fn new(raw: &str) -> AppResult<Self> {
        let value = bounded("Phone number", raw, PHONE_MAX_LENGTH)?;

        let allowed = |c: char| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '.' | '(' | ')');
        if !value.chars().all(allowed) || !value.chars().any(|c| c.is_ascii_digit()) {
            return Err(AppError::bad_request("Invalid phone number")
                .with_action("Use digits, spaces, '+', '-' or parentheses"));
        }
        Ok(Self(value))
    }

    pub fn from_db(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Bio shown on the portfolio
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AboutMe(String);

impl AboutMe {
    pub fn new(raw: &str) -> AppResult<Self> {
        bounded("About me", raw, ABOUT_ME_MAX_LENGTH).map(Self)
    }

    pub fn from_db(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name() {
        assert_eq!(FullName::new("  Jane Doe ").unwrap().as_str(), "Jane Doe");
        assert!(FullName::new("   ").is_err());
        assert!(FullName::new(&"x".repeat(FULL_NAME_MAX_LENGTH + 1)).is_err());
        assert!(FullName::new("Jane\u{0}Doe").is_err());
    }

    #[test]
    fn test_phone() {
        assert!(Phone::new("+1 (555) 010-2030").is_ok());
        assert!(Phone::new("09012345678").is_ok());
        assert!(Phone::new("call me").is_err());
        assert!(Phone::new("+-()").is_err());
        assert!(Phone::new("").is_err());
    }

    #[test]
    fn test_about_me_counts_chars_not_bytes() {
        let bio = "あ".repeat(ABOUT_ME_MAX_LENGTH);
        assert!(AboutMe::new(&bio).is_ok());
        assert!(AboutMe::new(&format!("{bio}あ")).is_err());
    }
}
