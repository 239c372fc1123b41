//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (CSPRNG, SHA-256, hex)
//! - Password hashing (Argon2id, NIST SP 800-63B policy)
//! - Bearer credential parsing for the `Authorization` header

pub mod bearer;
pub mod crypto;
pub mod password;
