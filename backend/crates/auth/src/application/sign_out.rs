//! Sign Out Use Case
//!
//! Deletes the refresh session behind a token. Outstanding access tokens stay
//! valid until they expire.

use std::sync::Arc;

use chrono::Utc;

use crate::application::config::AuthConfig;
use crate::application::session_store::RefreshSessionStore;
use crate::domain::repository::RefreshSessionRepository;
use crate::domain::value_object::refresh_token::RefreshToken;
use crate::error::{AuthError, AuthResult};

/// Sign out use case
pub struct SignOutUseCase<S>
where
    S: RefreshSessionRepository,
{
    sessions: RefreshSessionStore<S>,
}

impl<S> SignOutUseCase<S>
where
    S: RefreshSessionRepository,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            sessions: RefreshSessionStore::new(session_repo, config.refresh_token_ttl),
        }
    }

    pub async fn execute(&self, token: &RefreshToken) -> AuthResult<()> {
        let session = self
            .sessions
            .find(token)
            .await?
            .ok_or(AuthError::InvalidOrExpiredToken)?;

        if session.is_expired(Utc::now()) {
            return Err(AuthError::InvalidOrExpiredToken);
        }

        self.sessions.delete(token).await?;

        tracing::info!(
            identity_id = %session.identity_id,
            session_id = %session.id,
            "Identity signed out"
        );

        Ok(())
    }
}
