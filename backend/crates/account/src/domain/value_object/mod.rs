//! Value Objects

pub mod email;
pub mod media_asset;
pub mod profile_links;
pub mod profile_text;
pub mod reset_token;
pub mod user_password;
