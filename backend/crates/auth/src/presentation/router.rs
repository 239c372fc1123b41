//! Auth Router
//!
//! Sign-in, session and provisioning routes. Paths are absolute so the
//! router can be merged into the application router as-is.

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::access_token::AccessTokenCodec;
use crate::application::config::AuthConfig;
use crate::domain::repository::{IdentityRepository, RefreshSessionRepository};
use crate::domain::value_object::role::{Role, RoleSet};
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{role_gate, session_gate};

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(
    repo: PgAuthRepository,
    config: Arc<AuthConfig>,
    codec: Arc<AccessTokenCodec>,
) -> Router {
    auth_router_generic(repo, config, codec)
}

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<R>(
    repo: R,
    config: Arc<AuthConfig>,
    codec: Arc<AccessTokenCodec>,
) -> Router
where
    R: IdentityRepository + RefreshSessionRepository + Send + Sync + 'static,
{
    let repo = Arc::new(repo);
    let state = AuthAppState {
        repo: repo.clone(),
        config,
        codec: codec.clone(),
    };

    let public = Router::new()
        .route("/sign-in", post(handlers::sign_in::<R>))
        .route("/signin", post(handlers::sign_in::<R>))
        .route("/sign-in/admin", post(handlers::sign_in_admin::<R>))
        .route("/sign-in/subadmin", post(handlers::sign_in_subadmin::<R>))
        .route("/sign-in/user", post(handlers::sign_in_user::<R>));

    let session = session_gate(
        Router::new()
            .route("/session/refresh", post(handlers::refresh::<R>))
            .route("/session/sign-out", post(handlers::sign_out::<R>)),
        repo,
    );

    let admin_only = role_gate(
        Router::new().route(
            "/admin-only/sub-admin",
            post(handlers::create_sub_admin::<R>).get(handlers::list_sub_admins::<R>),
        ),
        codec.clone(),
        RoleSet::from([Role::Admin]),
    );

    let admin_or_sub_admin = role_gate(
        Router::new()
            .route("/admin-sub-admin/user", post(handlers::create_user::<R>))
            .route("/admin-sub-admin/users", get(handlers::list_users::<R>)),
        codec,
        RoleSet::from([Role::Admin, Role::Subadmin]),
    );

    public
        .merge(session)
        .merge(admin_only)
        .merge(admin_or_sub_admin)
        .with_state(state)
}
