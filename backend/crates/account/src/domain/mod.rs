//! Domain Layer
//!
//! Contains entities, value objects, repository traits and outbound ports.

pub mod entity;
pub mod ports;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{session::Session, user::User};
pub use ports::{Mailer, MediaStore, OutgoingEmail};
pub use repository::{SessionRepository, UserRepository};
