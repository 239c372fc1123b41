//! Application Layer
//!
//! Use cases and application services.

pub mod access_token;
pub mod bootstrap_admin;
pub mod config;
pub mod create_identity;
pub mod list_identities;
pub mod refresh;
pub mod session_store;
pub mod sign_in;
pub mod sign_out;

// Re-exports
pub use access_token::{AccessClaims, AccessTokenCodec};
pub use bootstrap_admin::BootstrapAdminUseCase;
pub use config::AuthConfig;
pub use create_identity::{CreateIdentityInput, CreateIdentityUseCase};
pub use list_identities::ListIdentitiesUseCase;
pub use refresh::RefreshUseCase;
pub use session_store::RefreshSessionStore;
pub use sign_in::{SignInInput, SignInUseCase, TokenPair};
pub use sign_out::SignOutUseCase;
