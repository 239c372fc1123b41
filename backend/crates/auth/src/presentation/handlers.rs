//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use kernel::extract::Json as JsonBody;
use kernel::pagination::{PageQuery, Pagination};

use crate::application::access_token::AccessTokenCodec;
use crate::application::config::AuthConfig;
use crate::application::{
    CreateIdentityInput, CreateIdentityUseCase, ListIdentitiesUseCase, RefreshUseCase,
    SignInInput, SignInUseCase, SignOutUseCase, TokenPair,
};
use crate::domain::repository::{IdentityRepository, RefreshSessionRepository};
use crate::domain::value_object::role::Role;
use crate::error::AuthResult;
use crate::presentation::dto::{
    CreateIdentityRequest, CreateIdentityResponse, IdentityResponse, SignInRequest, TokenResponse,
};
use crate::presentation::middleware::{AuthContext, SessionContext};

/// Shared state for auth handlers
pub struct AuthAppState<R>
where
    R: IdentityRepository + RefreshSessionRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub codec: Arc<AccessTokenCodec>,
}

impl<R> Clone for AuthAppState<R>
where
    R: IdentityRepository + RefreshSessionRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
            codec: self.codec.clone(),
        }
    }
}

fn token_response(message: &'static str, pair: TokenPair) -> TokenResponse {
    TokenResponse {
        message,
        access_token: pair.access_token,
        refresh_token: pair.refresh_token.into_string(),
    }
}

// ============================================================================
// Sign In
// ============================================================================

/// POST /sign-in
pub async fn sign_in<R>(
    State(state): State<AuthAppState<R>>,
    JsonBody(req): JsonBody<SignInRequest>,
) -> AuthResult<Json<TokenResponse>>
where
    R: IdentityRepository + RefreshSessionRepository + Send + Sync + 'static,
{
    sign_in_with_role(state, req, None).await
}

/// POST /sign-in/admin
pub async fn sign_in_admin<R>(
    State(state): State<AuthAppState<R>>,
    JsonBody(req): JsonBody<SignInRequest>,
) -> AuthResult<Json<TokenResponse>>
where
    R: IdentityRepository + RefreshSessionRepository + Send + Sync + 'static,
{
    sign_in_with_role(state, req, Some(Role::Admin)).await
}

/// POST /sign-in/subadmin
pub async fn sign_in_subadmin<R>(
    State(state): State<AuthAppState<R>>,
    JsonBody(req): JsonBody<SignInRequest>,
) -> AuthResult<Json<TokenResponse>>
where
    R: IdentityRepository + RefreshSessionRepository + Send + Sync + 'static,
{
    sign_in_with_role(state, req, Some(Role::Subadmin)).await
}

/// POST /sign-in/user
pub async fn sign_in_user<R>(
    State(state): State<AuthAppState<R>>,
    JsonBody(req): JsonBody<SignInRequest>,
) -> AuthResult<Json<TokenResponse>>
where
    R: IdentityRepository + RefreshSessionRepository + Send + Sync + 'static,
{
    sign_in_with_role(state, req, Some(Role::User)).await
}

async fn sign_in_with_role<R>(
    state: AuthAppState<R>,
    req: SignInRequest,
    required_role: Option<Role>,
) -> AuthResult<Json<TokenResponse>>
where
    R: IdentityRepository + RefreshSessionRepository + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.codec.clone(),
        state.config.clone(),
    );

    let pair = use_case
        .execute(SignInInput {
            email: req.email,
            password: req.password,
            required_role,
        })
        .await?;

    Ok(Json(token_response("Login successful", pair)))
}

// ============================================================================
// Session
// ============================================================================

/// POST /session/refresh
pub async fn refresh<R>(
    State(state): State<AuthAppState<R>>,
    session: SessionContext,
) -> AuthResult<Json<TokenResponse>>
where
    R: IdentityRepository + RefreshSessionRepository + Send + Sync + 'static,
{
    let use_case = RefreshUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.codec.clone(),
        state.config.clone(),
    );

    let pair = use_case.execute(&session.refresh_token).await?;

    Ok(Json(token_response("Refresh token generated", pair)))
}

/// POST /session/sign-out
pub async fn sign_out<R>(
    State(state): State<AuthAppState<R>>,
    session: SessionContext,
) -> AuthResult<impl IntoResponse>
where
    R: IdentityRepository + RefreshSessionRepository + Send + Sync + 'static,
{
    let use_case = SignOutUseCase::new(state.repo.clone(), state.config.clone());
    use_case.execute(&session.refresh_token).await?;

    Ok((StatusCode::OK, "Logout successful"))
}

// ============================================================================
// Provisioning
// ============================================================================

/// POST /admin-only/sub-admin
pub async fn create_sub_admin<R>(
    State(state): State<AuthAppState<R>>,
    caller: AuthContext,
    JsonBody(req): JsonBody<CreateIdentityRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: IdentityRepository + RefreshSessionRepository + Send + Sync + 'static,
{
    create_identity(state, caller, req, Role::Subadmin, "Subadmin created successfully").await
}

/// POST /admin-sub-admin/user
pub async fn create_user<R>(
    State(state): State<AuthAppState<R>>,
    caller: AuthContext,
    JsonBody(req): JsonBody<CreateIdentityRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: IdentityRepository + RefreshSessionRepository + Send + Sync + 'static,
{
    create_identity(state, caller, req, Role::User, "User created successfully").await
}

async fn create_identity<R>(
    state: AuthAppState<R>,
    caller: AuthContext,
    req: CreateIdentityRequest,
    role: Role,
    message: &'static str,
) -> AuthResult<(StatusCode, Json<CreateIdentityResponse>)>
where
    R: IdentityRepository + RefreshSessionRepository + Send + Sync + 'static,
{
    let use_case = CreateIdentityUseCase::new(state.repo.clone());

    let user_id = use_case
        .execute(CreateIdentityInput {
            username: req.username,
            email: req.email,
            password: req.password,
            role,
            created_by: Some(caller.identity_id),
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateIdentityResponse { message, user_id }),
    ))
}

// ============================================================================
// Listings
// ============================================================================

/// GET /admin-only/sub-admin
pub async fn list_sub_admins<R>(
    State(state): State<AuthAppState<R>>,
    Query(page): Query<PageQuery>,
) -> AuthResult<Json<Vec<IdentityResponse>>>
where
    R: IdentityRepository + RefreshSessionRepository + Send + Sync + 'static,
{
    let use_case = ListIdentitiesUseCase::new(state.repo.clone());
    let rows = use_case
        .by_role(Role::Subadmin, Pagination::from(page))
        .await?;

    Ok(Json(rows.into_iter().map(IdentityResponse::from).collect()))
}

/// GET /admin-sub-admin/users
pub async fn list_users<R>(
    State(state): State<AuthAppState<R>>,
    caller: AuthContext,
    Query(page): Query<PageQuery>,
) -> AuthResult<Json<Vec<IdentityResponse>>>
where
    R: IdentityRepository + RefreshSessionRepository + Send + Sync + 'static,
{
    let use_case = ListIdentitiesUseCase::new(state.repo.clone());
    let rows = use_case
        .visible_to(caller.identity_id, &caller.roles, Pagination::from(page))
        .await?;

    Ok(Json(rows.into_iter().map(IdentityResponse::from).collect()))
}
