//! Auth Middleware
//!
//! Three interceptors, all installed with `route_layer` so they only run for
//! matched routes:
//! - [`require_access_token`]: bearer access token, inserts [`AuthContext`]
//! - [`require_refresh_session`]: bearer refresh token, inserts [`SessionContext`]
//! - [`require_roles`]: needs an [`AuthContext`] whose roles meet the route's set
//!
//! Any failure short-circuits with the error response.

use std::sync::Arc;

use axum::Router;
use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::{self, Next};
use axum::response::Response;
use chrono::Utc;
use kernel::id::IdentityId;
use platform::bearer::extract_bearer;

use crate::application::access_token::AccessTokenCodec;
use crate::domain::repository::RefreshSessionRepository;
use crate::domain::value_object::{refresh_token::RefreshToken, role::RoleSet};
use crate::error::AuthError;

/// Caller identity from a verified access token
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub identity_id: IdentityId,
    pub roles: RoleSet,
}

/// Caller identity from a live refresh session
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub identity_id: IdentityId,
    pub refresh_token: RefreshToken,
}

impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .ok_or(AuthError::MissingAuthorization)
    }
}

impl<S> FromRequestParts<S> for SessionContext
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionContext>()
            .cloned()
            .ok_or(AuthError::MissingAuthorization)
    }
}

/// Middleware state for the session interceptor
pub struct SessionGateState<R> {
    pub repo: Arc<R>,
}

impl<R> Clone for SessionGateState<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
        }
    }
}

/// Middleware that requires a valid access token
pub async fn require_access_token(
    State(codec): State<Arc<AccessTokenCodec>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = extract_bearer(req.headers())?;
    let claims = codec.verify(token, Utc::now())?;

    req.extensions_mut().insert(AuthContext {
        identity_id: claims.identity_id,
        roles: claims.roles,
    });

    Ok(next.run(req).await)
}

/// Middleware that requires a live refresh session.
///
/// Expired sessions are rejected but left in place; the refresh use case
/// removes them.
pub async fn require_refresh_session<R>(
    State(state): State<SessionGateState<R>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError>
where
    R: RefreshSessionRepository + Send + Sync + 'static,
{
    let token = RefreshToken::from_client(extract_bearer(req.headers())?);

    let session = state
        .repo
        .find_by_digest(&token.digest())
        .await?
        .ok_or(AuthError::InvalidOrExpiredToken)?;

    if session.is_expired(Utc::now()) {
        return Err(AuthError::InvalidOrExpiredToken);
    }

    req.extensions_mut().insert(SessionContext {
        identity_id: session.identity_id,
        refresh_token: token,
    });

    Ok(next.run(req).await)
}

/// Middleware that requires the caller to hold one of `required`
pub async fn require_roles(
    State(required): State<Arc<RoleSet>>,
    req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let Some(ctx) = req.extensions().get::<AuthContext>() else {
        return Err(AuthError::NoRoles);
    };

    if ctx.roles.is_empty() {
        return Err(AuthError::NoRoles);
    }

    if !ctx.roles.has_any(&required) {
        tracing::debug!(
            identity_id = %ctx.identity_id,
            required = ?required.codes(),
            "Caller lacks required role"
        );
        return Err(AuthError::Forbidden);
    }

    Ok(next.run(req).await)
}

// ============================================================================
// Route gating helpers
// ============================================================================

/// Put every route of `router` behind the access interceptor.
pub fn access_gate<S>(router: Router<S>, codec: Arc<AccessTokenCodec>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.route_layer(middleware::from_fn_with_state(codec, require_access_token))
}

/// Access interceptor, then role interceptor for `required`.
///
/// The role set is built once here, not per request.
pub fn role_gate<S>(
    router: Router<S>,
    codec: Arc<AccessTokenCodec>,
    required: RoleSet,
) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    // the last route_layer added runs first
    let router = router.route_layer(middleware::from_fn_with_state(
        Arc::new(required),
        require_roles,
    ));
    access_gate(router, codec)
}

/// Put every route of `router` behind the session interceptor.
pub fn session_gate<S, R>(router: Router<S>, repo: Arc<R>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    R: RefreshSessionRepository + Send + Sync + 'static,
{
    router.route_layer(middleware::from_fn_with_state(
        SessionGateState { repo },
        require_refresh_session::<R>,
    ))
}
