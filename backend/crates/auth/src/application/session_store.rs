//! Refresh Session Store
//!
//! Token-level view over [`RefreshSessionRepository`]: callers deal in
//! plaintext [`RefreshToken`]s, the repository only ever sees digests.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use kernel::id::IdentityId;

use crate::domain::entity::refresh_session::RefreshSession;
use crate::domain::repository::RefreshSessionRepository;
use crate::domain::value_object::refresh_token::RefreshToken;
use crate::error::AuthResult;

pub struct RefreshSessionStore<S>
where
    S: RefreshSessionRepository,
{
    repo: Arc<S>,
    ttl: Duration,
}

impl<S> RefreshSessionStore<S>
where
    S: RefreshSessionRepository,
{
    pub fn new(repo: Arc<S>, ttl: Duration) -> Self {
        Self { repo, ttl }
    }

    /// Persist a fresh session for `owner` and return its plaintext token.
    pub async fn create(&self, owner: IdentityId, now: DateTime<Utc>) -> AuthResult<RefreshToken> {
        let (session, token) = RefreshSession::issue(owner, now, self.ttl)?;
        self.repo.create(&session).await?;

        tracing::debug!(
            identity_id = %owner,
            session_id = %session.id,
            expires_at = %session.expires_at,
            "Refresh session created"
        );

        Ok(token)
    }

    pub async fn find(&self, token: &RefreshToken) -> AuthResult<Option<RefreshSession>> {
        self.repo.find_by_digest(&token.digest()).await
    }

    /// At most one caller gets `Some` per token.
    pub async fn consume(&self, token: &RefreshToken) -> AuthResult<Option<RefreshSession>> {
        self.repo.consume(&token.digest()).await
    }

    /// Idempotent; `false` when the token was already gone.
    pub async fn delete(&self, token: &RefreshToken) -> AuthResult<bool> {
        self.repo.delete(&token.digest()).await
    }

    pub async fn cleanup_expired(&self, now: DateTime<Utc>) -> AuthResult<u64> {
        let deleted = self.repo.cleanup_expired(now).await?;
        tracing::info!(sessions_deleted = deleted, "Cleaned up expired refresh sessions");
        Ok(deleted)
    }
}
