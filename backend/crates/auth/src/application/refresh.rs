//! Refresh Use Case
//!
//! Exchanges a refresh token for a new token pair. The old session is
//! consumed with an atomic delete, so concurrent refreshes of one token
//! produce exactly one winner.

use std::sync::Arc;

use chrono::Utc;

use crate::application::access_token::AccessTokenCodec;
use crate::application::config::AuthConfig;
use crate::application::session_store::RefreshSessionStore;
use crate::application::sign_in::TokenPair;
use crate::domain::repository::{IdentityRepository, RefreshSessionRepository};
use crate::domain::value_object::refresh_token::RefreshToken;
use crate::error::{AuthError, AuthResult};

pub struct RefreshUseCase<I, S>
where
    I: IdentityRepository,
    S: RefreshSessionRepository,
{
    identity_repo: Arc<I>,
    sessions: RefreshSessionStore<S>,
    codec: Arc<AccessTokenCodec>,
}

impl<I, S> RefreshUseCase<I, S>
where
    I: IdentityRepository,
    S: RefreshSessionRepository,
{
    pub fn new(
        identity_repo: Arc<I>,
        session_repo: Arc<S>,
        codec: Arc<AccessTokenCodec>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            identity_repo,
            sessions: RefreshSessionStore::new(session_repo, config.refresh_token_ttl),
            codec,
        }
    }

    pub async fn execute(&self, token: &RefreshToken) -> AuthResult<TokenPair> {
        let now = Utc::now();

        let session = self
            .sessions
            .find(token)
            .await?
            .ok_or(AuthError::InvalidOrExpiredToken)?;

        if session.is_expired(now) {
            self.sessions.delete(token).await?;
            tracing::debug!(session_id = %session.id, "Expired refresh session removed");
            return Err(AuthError::InvalidOrExpiredToken);
        }

        let roles = self.identity_repo.roles_of(&session.identity_id).await?;
        let access_token = self.codec.issue(session.identity_id, &roles, now)?;

        // lost a race against another refresh (or a sign-out) of the same token
        if self.sessions.consume(token).await?.is_none() {
            tracing::warn!(session_id = %session.id, "Refresh token already consumed");
            return Err(AuthError::InvalidOrExpiredToken);
        }

        let refresh_token = self.sessions.create(session.identity_id, now).await?;

        tracing::info!(identity_id = %session.identity_id, "Refresh session rotated");

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }
}
