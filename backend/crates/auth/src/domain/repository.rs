//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use chrono::{DateTime, Utc};
use kernel::id::IdentityId;
use kernel::pagination::Pagination;

use crate::domain::entity::{
    identity::{Identity, IdentitySummary},
    refresh_session::RefreshSession,
};
use crate::domain::value_object::{
    email::Email,
    refresh_token::TokenDigest,
    role::{Role, RoleSet},
    visibility::Visibility,
};
use crate::error::AuthResult;

/// Identity repository trait
#[trait_variant::make(IdentityRepository: Send)]
pub trait LocalIdentityRepository {
    /// Find a non-archived identity by normalized email
    async fn find_active_by_email(&self, email: &Email) -> AuthResult<Option<Identity>>;

    /// Check whether a non-archived identity uses this email
    async fn exists_active_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// Current roles of an identity (empty when it has none)
    async fn roles_of(&self, identity_id: &IdentityId) -> AuthResult<RoleSet>;

    /// Insert the identity and its role association atomically.
    ///
    /// A duplicate email surfaces as [`AuthError::EmailTaken`](crate::error::AuthError::EmailTaken).
    async fn create_with_role(&self, identity: &Identity, role: Role) -> AuthResult<()>;

    /// Active identities holding `role`, newest first
    async fn list_by_role(&self, role: Role, page: Pagination)
    -> AuthResult<Vec<IdentitySummary>>;

    /// Active identities visible in `scope`, newest first
    async fn list_visible(
        &self,
        scope: Visibility,
        page: Pagination,
    ) -> AuthResult<Vec<IdentitySummary>>;
}

/// Refresh session repository trait
#[trait_variant::make(RefreshSessionRepository: Send)]
pub trait LocalRefreshSessionRepository {
    /// Persist a new session
    async fn create(&self, session: &RefreshSession) -> AuthResult<()>;

    /// Look up a session by token digest, expired or not
    async fn find_by_digest(&self, digest: &TokenDigest) -> AuthResult<Option<RefreshSession>>;

    /// Atomically delete and return the session.
    ///
    /// Of several concurrent callers with the same digest at most one
    /// receives `Some`.
    async fn consume(&self, digest: &TokenDigest) -> AuthResult<Option<RefreshSession>>;

    /// Delete a session; `false` when nothing matched
    async fn delete(&self, digest: &TokenDigest) -> AuthResult<bool>;

    /// Remove sessions with `expires_at <= now`
    async fn cleanup_expired(&self, now: DateTime<Utc>) -> AuthResult<u64>;
}
