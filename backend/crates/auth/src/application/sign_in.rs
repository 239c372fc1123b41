//! Sign In Use Case
//!
//! Authenticates an identity by email and password and opens a refresh
//! session.

use std::sync::Arc;

use chrono::Utc;

use crate::application::access_token::AccessTokenCodec;
use crate::application::config::AuthConfig;
use crate::application::session_store::RefreshSessionStore;
use crate::domain::repository::{IdentityRepository, RefreshSessionRepository};
use crate::domain::value_object::{email::Email, refresh_token::RefreshToken, role::Role};
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
    /// Role-scoped sign-in: the identity must hold this role
    pub required_role: Option<Role>,
}

/// Access token plus the refresh token that can renew it
#[derive(Debug)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: RefreshToken,
}

/// Sign in use case
pub struct SignInUseCase<I, S>
where
    I: IdentityRepository,
    S: RefreshSessionRepository,
{
    identity_repo: Arc<I>,
    sessions: RefreshSessionStore<S>,
    codec: Arc<AccessTokenCodec>,
}

impl<I, S> SignInUseCase<I, S>
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

    pub async fn execute(&self, input: SignInInput) -> AuthResult<TokenPair> {
        let email = Email::new(&input.email).map_err(|_| AuthError::InvalidCredentials)?;

        let identity = self
            .identity_repo
            .find_active_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !identity.password.verify(input.password).await {
            return Err(AuthError::InvalidCredentials);
        }

        let roles = self.identity_repo.roles_of(&identity.id).await?;

        if let Some(required) = input.required_role {
            if !roles.contains(required) {
                tracing::warn!(
                    identity_id = %identity.id,
                    required_role = %required,
                    "Role-scoped sign-in by identity without that role"
                );
                return Err(AuthError::InvalidCredentials);
            }
        }

        let now = Utc::now();
        let access_token = self.codec.issue(identity.id, &roles, now)?;
        let refresh_token = self.sessions.create(identity.id, now).await?;

        tracing::info!(
            identity_id = %identity.id,
            roles = ?roles.codes(),
            "Identity signed in"
        );

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }
}
