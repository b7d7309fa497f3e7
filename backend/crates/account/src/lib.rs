//! Account Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository and port traits
//! - `application/` - Use cases
//! - `infra/` - PostgreSQL, Cloudinary and SMTP adapters
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Registration with avatar/resume upload, email + password login
//! - Server-side sessions with an HMAC-signed `token` cookie
//! - Profile and password management
//! - Password reset via emailed single-use tokens
//! - Public read of the configured portfolio owner

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AccountConfig;
pub use error::{AccountError, AccountResult};
pub use infra::cloudinary::{CloudinaryConfig, CloudinaryMediaStore};
pub use infra::postgres::PgAccountRepository;
pub use infra::smtp::{SmtpConfig, SmtpMailer};
pub use presentation::router::account_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
