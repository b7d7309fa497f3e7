//! Shared Kernel
//!
//! The small vocabulary every backend crate agrees on:
//! - the unified [`error::app_error::AppError`] and its HTTP mapping
//! - typed identifiers ([`id::UserId`], [`id::SessionId`])
//!
//! Anything domain specific (users, passwords, media) lives in the
//! `account` crate, anything purely technical in `platform`.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
