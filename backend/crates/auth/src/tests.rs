//! Crate-level tests: use cases and the HTTP surface against an in-memory
//! repository.

#[cfg(test)]
mod in_memory {
    use std::sync::{Arc, Mutex};

    use chrono::{DateTime, Utc};
    use kernel::id::IdentityId;
    use kernel::pagination::Pagination;

    use crate::domain::entity::{
        identity::{Identity, IdentitySummary},
        refresh_session::RefreshSession,
    };
    use crate::domain::repository::{IdentityRepository, RefreshSessionRepository};
    use crate::domain::value_object::{
        email::Email,
        password::NewPassword,
        refresh_token::TokenDigest,
        role::{Role, RoleSet},
        username::Username,
        visibility::Visibility,
    };
    use crate::error::{AuthError, AuthResult};

    #[derive(Default)]
    struct Store {
        identities: Vec<(Identity, RoleSet)>,
        sessions: Vec<RefreshSession>,
    }

    /// Shares its state across clones, like a connection pool would.
    #[derive(Clone, Default)]
    pub struct InMemoryAuthRepository {
        store: Arc<Mutex<Store>>,
    }

    impl InMemoryAuthRepository {
        pub async fn seed(
            &self,
            email: &str,
            password: &str,
            roles: &[Role],
            created_by: Option<IdentityId>,
        ) -> IdentityId {
            let digest = NewPassword::new(password.to_string())
                .unwrap()
                .hash()
                .await
                .unwrap();
            let identity = Identity::new(
                Username::new(email.split('@').next().unwrap()).unwrap(),
                Email::new(email).unwrap(),
                digest,
                created_by,
                Utc::now(),
            );
            let id = identity.id;
            self.store
                .lock()
                .unwrap()
                .identities
                .push((identity, roles.iter().copied().collect()));
            id
        }

        pub fn insert_session(&self, session: RefreshSession) {
            self.store.lock().unwrap().sessions.push(session);
        }

        pub fn session_count(&self) -> usize {
            self.store.lock().unwrap().sessions.len()
        }

        pub fn stored_digests(&self) -> Vec<String> {
            let store = self.store.lock().unwrap();
            store
                .sessions
                .iter()
                .map(|s| s.token_digest.as_str().to_string())
                .collect()
        }

        fn summaries<F>(&self, page: Pagination, keep: F) -> Vec<IdentitySummary>
        where
            F: Fn(&Identity, &RoleSet) -> bool,
        {
            let store = self.store.lock().unwrap();
            let mut rows: Vec<IdentitySummary> = store
                .identities
                .iter()
                .filter(|(i, roles)| i.is_active() && keep(i, roles))
                .map(|(i, _)| i.summary())
                .collect();
            rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            rows.into_iter()
                .skip(page.offset() as usize)
                .take(page.limit() as usize)
                .collect()
        }
    }

    impl IdentityRepository for InMemoryAuthRepository {
        async fn find_active_by_email(&self, email: &Email) -> AuthResult<Option<Identity>> {
            let store = self.store.lock().unwrap();
            Ok(store
                .identities
                .iter()
                .find(|(i, _)| i.is_active() && &i.email == email)
                .map(|(i, _)| i.clone()))
        }

        async fn exists_active_by_email(&self, email: &Email) -> AuthResult<bool> {
            Ok(self.find_active_by_email(email).await?.is_some())
        }

        async fn roles_of(&self, identity_id: &IdentityId) -> AuthResult<RoleSet> {
            let store = self.store.lock().unwrap();
            Ok(store
                .identities
                .iter()
                .find(|(i, _)| &i.id == identity_id)
                .map(|(_, roles)| roles.clone())
                .unwrap_or_default())
        }

        async fn create_with_role(&self, identity: &Identity, role: Role) -> AuthResult<()> {
            let mut store = self.store.lock().unwrap();
            if store
                .identities
                .iter()
                .any(|(i, _)| i.is_active() && i.email == identity.email)
            {
                return Err(AuthError::EmailTaken);
            }
            store
                .identities
                .push((identity.clone(), RoleSet::from([role])));
            Ok(())
        }

        async fn list_by_role(
            &self,
            role: Role,
            page: Pagination,
        ) -> AuthResult<Vec<IdentitySummary>> {
            Ok(self.summaries(page, |_, roles| roles.contains(role)))
        }

        async fn list_visible(
            &self,
            scope: Visibility,
            page: Pagination,
        ) -> AuthResult<Vec<IdentitySummary>> {
            Ok(self.summaries(page, |i, _| match scope {
                Visibility::All => true,
                Visibility::CreatedBy(creator) => i.created_by == Some(creator),
            }))
        }
    }

    impl RefreshSessionRepository for InMemoryAuthRepository {
        async fn create(&self, session: &RefreshSession) -> AuthResult<()> {
            self.insert_session(session.clone());
            Ok(())
        }

        async fn find_by_digest(&self, digest: &TokenDigest) -> AuthResult<Option<RefreshSession>> {
            let store = self.store.lock().unwrap();
            Ok(store
                .sessions
                .iter()
                .find(|s| s.token_digest.matches(digest))
                .cloned())
        }

        async fn consume(&self, digest: &TokenDigest) -> AuthResult<Option<RefreshSession>> {
            // one lock for find + remove, like DELETE ... RETURNING
            let mut store = self.store.lock().unwrap();
            let position = store
                .sessions
                .iter()
                .position(|s| s.token_digest.matches(digest));
            Ok(position.map(|idx| store.sessions.remove(idx)))
        }

        async fn delete(&self, digest: &TokenDigest) -> AuthResult<bool> {
            Ok(self.consume(digest).await?.is_some())
        }

        async fn cleanup_expired(&self, now: DateTime<Utc>) -> AuthResult<u64> {
            let mut store = self.store.lock().unwrap();
            let before = store.sessions.len();
            store.sessions.retain(|s| !s.is_expired(now));
            Ok((before - store.sessions.len()) as u64)
        }
    }
}

#[cfg(test)]
mod lifecycle_tests {
    use std::sync::Arc;

    use chrono::{Duration, Utc};
    use kernel::id::IdentityId;
    use kernel::pagination::Pagination;

    use super::in_memory::InMemoryAuthRepository;
    use crate::application::session_store::RefreshSessionStore;
    use crate::application::{
        AccessTokenCodec, AuthConfig, BootstrapAdminUseCase, CreateIdentityInput,
        CreateIdentityUseCase, ListIdentitiesUseCase, RefreshUseCase, SignInInput, SignInUseCase,
        SignOutUseCase,
    };
    use crate::domain::entity::refresh_session::RefreshSession;
    use crate::domain::value_object::refresh_token::RefreshToken;
    use crate::domain::value_object::role::{Role, RoleSet};
    use crate::error::AuthError;

    const PASSWORD: &str = "Harbor-Light-2024";

    struct Fixture {
        repo: Arc<InMemoryAuthRepository>,
        config: Arc<AuthConfig>,
        codec: Arc<AccessTokenCodec>,
    }

    impl Fixture {
        fn new() -> Self {
            let config = Arc::new(AuthConfig::new("lifecycle-test-secret", 7));
            Self {
                repo: Arc::new(InMemoryAuthRepository::default()),
                codec: Arc::new(AccessTokenCodec::new(&config)),
                config,
            }
        }

        fn sign_in(&self) -> SignInUseCase<InMemoryAuthRepository, InMemoryAuthRepository> {
            SignInUseCase::new(
                self.repo.clone(),
                self.repo.clone(),
                self.codec.clone(),
                self.config.clone(),
            )
        }

        fn refresh(&self) -> RefreshUseCase<InMemoryAuthRepository, InMemoryAuthRepository> {
            RefreshUseCase::new(
                self.repo.clone(),
                self.repo.clone(),
                self.codec.clone(),
                self.config.clone(),
            )
        }

        fn sign_out(&self) -> SignOutUseCase<InMemoryAuthRepository> {
            SignOutUseCase::new(self.repo.clone(), self.config.clone())
        }
    }

    fn input(email: &str, password: &str, role: Option<Role>) -> SignInInput {
        SignInInput {
            email: email.to_string(),
            password: password.to_string(),
            required_role: role,
        }
    }

    #[tokio::test]
    async fn test_sign_in_issues_verifiable_pair() {
        let fx = Fixture::new();
        let id = fx
            .repo
            .seed("chef@example.com", PASSWORD, &[Role::Subadmin], None)
            .await;

        let pair = fx
            .sign_in()
            .execute(input("  Chef@Example.com ", PASSWORD, None))
            .await
            .unwrap();

        let claims = fx.codec.verify(&pair.access_token, Utc::now()).unwrap();
        assert_eq!(claims.identity_id, id);
        assert_eq!(claims.roles, RoleSet::from([Role::Subadmin]));
        assert_eq!(pair.refresh_token.as_str().len(), 64);

        // only the SHA-256 digest is persisted
        let digests = fx.repo.stored_digests();
        assert_eq!(digests.len(), 1);
        assert_ne!(digests[0], pair.refresh_token.as_str());
        assert_eq!(hex::decode(&digests[0]).unwrap().len(), 32);
    }

    #[tokio::test]
    async fn test_sign_in_with_out_of_range_ttl_fails_cleanly() {
        let mut fx = Fixture::new();
        fx.config = Arc::new(AuthConfig::new("lifecycle-test-secret", 100_000_000));
        fx.repo
            .seed("user@example.com", PASSWORD, &[Role::User], None)
            .await;

        let err = fx
            .sign_in()
            .execute(input("user@example.com", PASSWORD, None))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::Internal(_)));
        assert_eq!(err.to_app_error().message(), "internal server error");
        assert_eq!(fx.repo.session_count(), 0);
    }

    #[tokio::test]
    async fn test_sign_in_failures_are_invalid_credentials() {
        let fx = Fixture::new();
        fx.repo
            .seed("user@example.com", PASSWORD, &[Role::User], None)
            .await;

        for attempt in [
            input("user@example.com", "wrong-password", None),
            input("nobody@example.com", PASSWORD, None),
            input("not-an-email", PASSWORD, None),
            input("user@example.com", PASSWORD, Some(Role::Admin)),
        ] {
            assert!(matches!(
                fx.sign_in().execute(attempt).await,
                Err(AuthError::InvalidCredentials)
            ));
        }
        assert_eq!(fx.repo.session_count(), 0);
    }

    #[tokio::test]
    async fn test_role_scoped_sign_in_accepts_holder() {
        let fx = Fixture::new();
        fx.repo
            .seed("boss@example.com", PASSWORD, &[Role::Admin], None)
            .await;

        let pair = fx
            .sign_in()
            .execute(input("boss@example.com", PASSWORD, Some(Role::Admin)))
            .await;
        assert!(pair.is_ok());
    }

    #[tokio::test]
    async fn test_refresh_rotates_token() {
        let fx = Fixture::new();
        fx.repo
            .seed("user@example.com", PASSWORD, &[Role::User], None)
            .await;
        let first = fx
            .sign_in()
            .execute(input("user@example.com", PASSWORD, None))
            .await
            .unwrap();

        let second = fx.refresh().execute(&first.refresh_token).await.unwrap();
        assert_ne!(second.refresh_token, first.refresh_token);
        assert_eq!(fx.repo.session_count(), 1);

        // the old token is spent
        assert!(matches!(
            fx.refresh().execute(&first.refresh_token).await,
            Err(AuthError::InvalidOrExpiredToken)
        ));
        assert!(fx.refresh().execute(&second.refresh_token).await.is_ok());
    }

    #[tokio::test]
    async fn test_concurrent_refresh_has_single_winner() {
        let fx = Fixture::new();
        fx.repo
            .seed("user@example.com", PASSWORD, &[Role::User], None)
            .await;
        let pair = fx
            .sign_in()
            .execute(input("user@example.com", PASSWORD, None))
            .await
            .unwrap();

        let use_case = Arc::new(fx.refresh());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let use_case = use_case.clone();
            let token = pair.refresh_token.clone();
            handles.push(tokio::spawn(async move { use_case.execute(&token).await }));
        }

        let mut winners = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => winners += 1,
                Err(e) => assert!(matches!(e, AuthError::InvalidOrExpiredToken)),
            }
        }
        assert_eq!(winners, 1);
        assert_eq!(fx.repo.session_count(), 1);
    }

    #[tokio::test]
    async fn test_expired_refresh_is_deleted() {
        let fx = Fixture::new();
        let id = fx
            .repo
            .seed("user@example.com", PASSWORD, &[Role::User], None)
            .await;
        let (session, token) =
            RefreshSession::issue(id, Utc::now() - Duration::days(8), Duration::days(7)).unwrap();
        fx.repo.insert_session(session);

        assert!(matches!(
            fx.refresh().execute(&token).await,
            Err(AuthError::InvalidOrExpiredToken)
        ));
        assert_eq!(fx.repo.session_count(), 0);
    }

    #[tokio::test]
    async fn test_sign_out_then_refresh_fails() {
        let fx = Fixture::new();
        fx.repo
            .seed("user@example.com", PASSWORD, &[Role::User], None)
            .await;
        let pair = fx
            .sign_in()
            .execute(input("user@example.com", PASSWORD, None))
            .await
            .unwrap();

        fx.sign_out().execute(&pair.refresh_token).await.unwrap();

        assert!(matches!(
            fx.refresh().execute(&pair.refresh_token).await,
            Err(AuthError::InvalidOrExpiredToken)
        ));
        assert!(matches!(
            fx.sign_out().execute(&pair.refresh_token).await,
            Err(AuthError::InvalidOrExpiredToken)
        ));
    }

    #[tokio::test]
    async fn test_unknown_token_is_rejected() {
        let fx = Fixture::new();
        let bogus = RefreshToken::from_client("deadbeef");
        assert!(matches!(
            fx.refresh().execute(&bogus).await,
            Err(AuthError::InvalidOrExpiredToken)
        ));
    }

    #[tokio::test]
    async fn test_store_cleanup_expired() {
        let fx = Fixture::new();
        let id = IdentityId::new();
        let now = Utc::now();
        let (stale, _) = RefreshSession::issue(id, now - Duration::days(10), Duration::days(7)).unwrap();
        let (live, _) = RefreshSession::issue(id, now, Duration::days(7)).unwrap();
        fx.repo.insert_session(stale);
        fx.repo.insert_session(live);

        let store = RefreshSessionStore::new(fx.repo.clone(), fx.config.refresh_token_ttl);
        assert_eq!(store.cleanup_expired(now).await.unwrap(), 1);
        assert_eq!(fx.repo.session_count(), 1);
        assert!(!store.delete(&RefreshToken::from_client("absent")).await.unwrap());
    }

    #[tokio::test]
    async fn test_create_identity_validation_and_conflict() {
        let fx = Fixture::new();
        let admin = fx
            .repo
            .seed("admin@example.com", PASSWORD, &[Role::Admin], None)
            .await;
        let use_case = CreateIdentityUseCase::new(fx.repo.clone());

        let make = |username: &str, email: &str, password: &str| CreateIdentityInput {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role: Role::Subadmin,
            created_by: Some(admin),
        };

        assert!(matches!(
            use_case.execute(make("", "sub@example.com", PASSWORD)).await,
            Err(AuthError::Validation(_))
        ));
        assert!(matches!(
            use_case.execute(make("sub", "sub@example.com", "12345678")).await,
            Err(AuthError::Validation(_))
        ));
        assert!(matches!(
            use_case.execute(make("dup", "ADMIN@example.com", PASSWORD)).await,
            Err(AuthError::EmailTaken)
        ));

        let id = use_case
            .execute(make("sub", "sub@example.com", PASSWORD))
            .await
            .unwrap();
        let listed = ListIdentitiesUseCase::new(fx.repo.clone())
            .by_role(Role::Subadmin, Pagination::default())
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, id);
        assert_eq!(listed[0].created_by, Some(admin));
    }

    #[tokio::test]
    async fn test_visible_to_scopes_by_creator() {
        let fx = Fixture::new();
        let admin = fx
            .repo
            .seed("admin@example.com", PASSWORD, &[Role::Admin], None)
            .await;
        let sub_a = fx
            .repo
            .seed("a@example.com", PASSWORD, &[Role::Subadmin], Some(admin))
            .await;
        fx.repo
            .seed("u1@example.com", PASSWORD, &[Role::User], Some(sub_a))
            .await;

        let list = ListIdentitiesUseCase::new(fx.repo.clone());
        let page = Pagination::default();

        let for_admin = list
            .visible_to(admin, &RoleSet::from([Role::Admin]), page)
            .await
            .unwrap();
        assert_eq!(for_admin.len(), 3);

        let for_sub = list
            .visible_to(sub_a, &RoleSet::from([Role::Subadmin]), page)
            .await
            .unwrap();
        assert_eq!(for_sub.len(), 1);
        assert_eq!(for_sub[0].email, "u1@example.com");
    }

    #[tokio::test]
    async fn test_bootstrap_admin_is_idempotent() {
        let fx = Fixture::new();
        let bootstrap = BootstrapAdminUseCase::new(fx.repo.clone());

        let first = bootstrap
            .execute("root@example.com", PASSWORD.to_string())
            .await
            .unwrap();
        assert!(first.is_some());

        let second = bootstrap
            .execute("ROOT@example.com", PASSWORD.to_string())
            .await
            .unwrap();
        assert!(second.is_none());

        let pair = fx
            .sign_in()
            .execute(input("root@example.com", PASSWORD, Some(Role::Admin)))
            .await;
        assert!(pair.is_ok());
    }
}

#[cfg(test)]
mod router_tests {
    use std::sync::Arc;

    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::in_memory::InMemoryAuthRepository;
    use crate::application::{AccessTokenCodec, AuthConfig};
    use crate::domain::value_object::role::Role;
    use crate::presentation::router::auth_router_generic;

    const PASSWORD: &str = "Harbor-Light-2024";

    async fn app() -> (Router, InMemoryAuthRepository) {
        let repo = InMemoryAuthRepository::default();
        let admin = repo
            .seed("admin@example.com", PASSWORD, &[Role::Admin], None)
            .await;
        repo.seed("user@example.com", PASSWORD, &[Role::User], Some(admin))
            .await;

        let config = Arc::new(AuthConfig::new("router-test-secret", 7));
        let codec = Arc::new(AccessTokenCodec::new(&config));
        (auth_router_generic(repo.clone(), config, codec), repo)
    }

    fn post_json(uri: &str, bearer: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::post(uri).header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn post_empty(uri: &str, bearer: &str) -> Request<Body> {
        Request::post(uri)
            .header(header::AUTHORIZATION, format!("Bearer {bearer}"))
            .body(Body::empty())
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn sign_in(app: &Router, uri: &str, email: &str) -> Value {
        let response = app
            .clone()
            .oneshot(post_json(
                uri,
                None,
                json!({ "email": email, "password": PASSWORD }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        body_json(response).await
    }

    #[tokio::test]
    async fn test_sign_in_ok_and_wrong_password() {
        let (app, _) = app().await;

        let body = sign_in(&app, "/sign-in", "admin@example.com").await;
        assert_eq!(body["message"], "Login successful");
        assert!(body["access_token"].as_str().unwrap().contains('.'));
        assert_eq!(body["refresh_token"].as_str().unwrap().len(), 64);

        let response = app
            .clone()
            .oneshot(post_json(
                "/signin",
                None,
                json!({ "email": "admin@example.com", "password": "nope-nope-nope" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_text(response).await, "invalid email or password");
    }

    #[tokio::test]
    async fn test_sign_in_with_unreadable_body_is_400() {
        let (app, repo) = app().await;

        for body in [
            json!({ "email": "admin@example.com" }),
            json!({ "email": 5, "password": PASSWORD }),
        ] {
            let response = app
                .clone()
                .oneshot(post_json("/sign-in", None, body))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(body_text(response).await, "invalid request body");
        }
        assert_eq!(repo.session_count(), 0);
    }

    #[tokio::test]
    async fn test_role_scoped_sign_in_rejects_other_roles() {
        let (app, _) = app().await;

        let response = app
            .clone()
            .oneshot(post_json(
                "/sign-in/admin",
                None,
                json!({ "email": "user@example.com", "password": PASSWORD }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        sign_in(&app, "/sign-in/user", "user@example.com").await;
    }

    #[tokio::test]
    async fn test_admin_route_rejects_user_role() {
        let (app, _) = app().await;
        let body = sign_in(&app, "/sign-in", "user@example.com").await;
        let token = body["access_token"].as_str().unwrap();

        let response = app
            .clone()
            .oneshot(post_json(
                "/admin-only/sub-admin",
                Some(token),
                json!({ "username": "s", "email": "s@example.com", "password": PASSWORD }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(body_text(response).await, "Forbidden: insufficient permissions");
    }

    #[tokio::test]
    async fn test_protected_route_header_errors() {
        let (app, _) = app().await;

        let response = app
            .clone()
            .oneshot(
                Request::get("/admin-sub-admin/users")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_text(response).await, "missing Authorization header");

        let response = app
            .clone()
            .oneshot(
                Request::get("/admin-sub-admin/users")
                    .header(header::AUTHORIZATION, "Token abc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_text(response).await, "invalid Authorization format");

        let response = app
            .clone()
            .oneshot(
                Request::get("/admin-sub-admin/users")
                    .header(header::AUTHORIZATION, "Bearer not-a-jwt")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_text(response).await, "invalid or expired token");
    }

    #[tokio::test]
    async fn test_admin_creates_and_lists_sub_admin() {
        let (app, _) = app().await;
        let body = sign_in(&app, "/sign-in/admin", "admin@example.com").await;
        let token = body["access_token"].as_str().unwrap().to_string();

        let response = app
            .clone()
            .oneshot(post_json(
                "/admin-only/sub-admin",
                Some(&token),
                json!({ "username": "Sub", "email": "Sub@Example.com", "password": PASSWORD }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = body_json(response).await;
        assert_eq!(created["message"], "Subadmin created successfully");

        let response = app
            .clone()
            .oneshot(post_json(
                "/admin-only/sub-admin",
                Some(&token),
                json!({ "username": "Again", "email": "sub@example.com", "password": PASSWORD }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(body_text(response).await, "Email already exists");

        let response = app
            .clone()
            .oneshot(
                Request::get("/admin-only/sub-admin?page=1&limit=10")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let listed = body_json(response).await;
        assert_eq!(listed.as_array().unwrap().len(), 1);
        assert_eq!(listed[0]["email"], "sub@example.com");
        assert_eq!(listed[0]["id"], created["user_id"]);
        assert!(listed[0].get("password").is_none());
    }

    #[tokio::test]
    async fn test_refresh_and_sign_out_flow() {
        let (app, repo) = app().await;
        let body = sign_in(&app, "/sign-in", "user@example.com").await;
        let refresh_token = body["refresh_token"].as_str().unwrap().to_string();

        let response = app
            .clone()
            .oneshot(post_empty("/session/refresh", &refresh_token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let rotated = body_json(response).await;
        assert_eq!(rotated["message"], "Refresh token generated");
        let new_refresh = rotated["refresh_token"].as_str().unwrap().to_string();

        // the access token cannot stand in for a refresh token
        let access = rotated["access_token"].as_str().unwrap();
        let response = app
            .clone()
            .oneshot(post_empty("/session/refresh", access))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app
            .clone()
            .oneshot(post_empty("/session/sign-out", &new_refresh))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "Logout successful");
        assert_eq!(repo.session_count(), 0);

        let response = app
            .clone()
            .oneshot(post_empty("/session/refresh", &new_refresh))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_text(response).await, "invalid or expired token");
    }
}
