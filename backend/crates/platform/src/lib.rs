//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256, SHA-1, HMAC, hex, Base64)
//! - Password hashing (Argon2id, NIST SP 800-63B compliant)
//! - Cookie management
//! - Client identification from request headers

pub mod client;
pub mod cookie;
pub mod crypto;
pub mod password;
