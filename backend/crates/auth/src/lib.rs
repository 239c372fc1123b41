//! Auth (Authentication & Authorization) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases, access token codec, refresh session store
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router, interceptors
//!
//! ## Features
//! - Email + password sign-in, optionally scoped to a role
//! - Short-lived HS256 access tokens carrying the caller's roles
//! - Single-use refresh tokens, rotated atomically on refresh
//! - Role-gated routes (admin / subadmin / user)
//! - Provisioning of sub-admins and users by their superiors
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (NIST SP 800-63B policy for new accounts)
//! - Refresh tokens stored as SHA-256 digests, never in plaintext
//! - Expired and consumed tokens are indistinguishable to the caller

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::{access_token::AccessTokenCodec, config::AuthConfig};
pub use domain::value_object::role::{Role, RoleSet};
pub use domain::value_object::visibility::Visibility;
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgAuthRepository;
pub use presentation::middleware::{AuthContext, access_gate, role_gate};
pub use presentation::router::{auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[cfg(test)]
mod tests;
