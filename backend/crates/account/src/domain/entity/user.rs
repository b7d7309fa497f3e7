//! User Entity
//!
//! The portfolio owner's account: profile, credentials, hosted media and
//! the password reset state.

use chrono::{DateTime, Duration, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{
    email::Email,
    media_asset::MediaAsset,
    profile_links::ProfileLinks,
    profile_text::{AboutMe, FullName, Phone},
    reset_token::ResetToken,
    user_password::{RawPassword, UserPassword},
};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    pub full_name: FullName,
    pub email: Email,
    pub phone: Phone,
    pub about_me: AboutMe,
    /// Never serialized
    pub password: UserPassword,
    pub links: ProfileLinks,
    pub avatar: MediaAsset,
    pub resume: MediaAsset,
    /// SHA-256 hex of the outstanding reset token
    pub reset_password_token: Option<String>,
    pub reset_password_expire: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated registration data
pub struct NewUser {
    pub full_name: FullName,
    pub email: Email,
    pub phone: Phone,
    pub about_me: AboutMe,
    pub password: UserPassword,
    pub links: ProfileLinks,
    pub avatar: MediaAsset,
    pub resume: MediaAsset,
}

impl User {
    pub fn new(data: NewUser) -> Self {
        let now = Utc::now();
        Self {
            user_id: UserId::new(),
            full_name: data.full_name,
            email: data.email,
            phone: data.phone,
            about_me: data.about_me,
            password: data.password,
            links: data.links,
            avatar: data.avatar,
            resume: data.resume,
            reset_password_token: None,
            reset_password_expire: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn verify_password(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.password.verify(raw, pepper)
    }

    pub fn set_password(&mut self, password: UserPassword) {
        self.password = password;
        self.touch();
    }

    /// Start a reset: store the token hash with its deadline, hand back the
    /// plaintext for the email. Replaces any earlier token.
    pub fn issue_reset_token(&mut self, ttl: Duration, now: DateTime<Utc>) -> ResetToken {
        let token = ResetToken::generate();
        self.reset_password_token = Some(token.hash());
        self.reset_password_expire = Some(now + ttl);
        self.updated_at = now;
        token
    }

    /// Token hash matches and its deadline is still ahead of `now`
    pub fn reset_token_matches(&self, token_hash: &str, now: DateTime<Utc>) -> bool {
        match (&self.reset_password_token, self.reset_password_expire) {
            (Some(stored), Some(expire)) => {
                platform::crypto::constant_time_eq(stored.as_bytes(), token_hash.as_bytes())
                    && expire > now
            }
            _ => false,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        let raw = RawPassword::new("Portfolio#2024!".to_string()).unwrap();
        User::new(NewUser {
            full_name: FullName::new("Jane Doe").unwrap(),
            email: Email::new("jane@example.com").unwrap(),
            phone: Phone::new("+1 555 0100").unwrap(),
            about_me: AboutMe::new("Rustacean").unwrap(),
            password: UserPassword::from_raw(&raw, None).unwrap(),
            links: ProfileLinks::default(),
            avatar: MediaAsset::new("PORTFOLIO AVATAR/a", "https://cdn.example.com/a.png"),
            resume: MediaAsset::new("PORTFOLIO RESUME/r", "https://cdn.example.com/r.pdf"),
        })
    }

    #[test]
    fn test_issue_reset_token_stores_hash_and_deadline() {
        let mut user = user();
        let now = Utc::now();
        let token = user.issue_reset_token(Duration::minutes(15), now);

        assert_eq!(user.reset_password_token.as_deref(), Some(token.hash().as_str()));
        assert_eq!(user.reset_password_expire, Some(now + Duration::minutes(15)));
        assert!(user.reset_token_matches(&token.hash(), now));
    }

    #[test]
    fn test_reset_token_expires() {
        let mut user = user();
        let now = Utc::now();
        let token = user.issue_reset_token(Duration::minutes(15), now);

        assert!(user.reset_token_matches(&token.hash(), now + Duration::minutes(14)));
        assert!(!user.reset_token_matches(&token.hash(), now + Duration::minutes(15)));
    }

    #[test]
    fn test_reissue_invalidates_previous_token() {
        let mut user = user();
        let now = Utc::now();
        let first = user.issue_reset_token(Duration::minutes(15), now);
        let second = user.issue_reset_token(Duration::minutes(15), now);

        assert!(!user.reset_token_matches(&first.hash(), now));
        assert!(user.reset_token_matches(&second.hash(), now));
    }
}
