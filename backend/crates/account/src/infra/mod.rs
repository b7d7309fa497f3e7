//! Infrastructure Layer
//!
//! Adapters for the database, the media host and the mail relay.

pub mod cloudinary;
pub mod postgres;
pub mod smtp;
