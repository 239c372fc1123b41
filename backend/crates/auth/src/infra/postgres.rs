//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::error::conversions::is_unique_violation;
use kernel::id::{IdentityId, RefreshSessionId};
use kernel::pagination::Pagination;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{
    identity::{Identity, IdentitySummary},
    refresh_session::RefreshSession,
};
use crate::domain::repository::{IdentityRepository, RefreshSessionRepository};
use crate::domain::value_object::{
    email::Email,
    password::PasswordDigest,
    refresh_token::TokenDigest,
    role::{Role, RoleSet},
    username::Username,
    visibility::Visibility,
};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_insert_error(err: sqlx::Error) -> AuthError {
    if is_unique_violation(&err) {
        AuthError::EmailTaken
    } else {
        AuthError::Database(err)
    }
}

// ============================================================================
// Identity Repository Implementation
// ============================================================================

impl IdentityRepository for PgAuthRepository {
    async fn find_active_by_email(&self, email: &Email) -> AuthResult<Option<Identity>> {
        let row = sqlx::query_as::<_, IdentityRow>(
            r#"
            SELECT
                id,
                username,
                email,
                password_hash,
                created_by,
                created_at,
                archived_at
            FROM identities
            WHERE email = $1 AND archived_at IS NULL
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(IdentityRow::into_identity))
    }

    async fn exists_active_by_email(&self, email: &Email) -> AuthResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM identities WHERE email = $1 AND archived_at IS NULL)",
        )
        .bind(email.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn roles_of(&self, identity_id: &IdentityId) -> AuthResult<RoleSet> {
        let names: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT r.role_name
            FROM roles r
            JOIN identity_roles ir ON ir.role_id = r.id
            WHERE ir.identity_id = $1
            "#,
        )
        .bind(identity_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(RoleSet::from_names(names))
    }

    async fn create_with_role(&self, identity: &Identity, role: Role) -> AuthResult<()> {
        // dropped without commit on any early return, which rolls back
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO identities (
                id,
                username,
                email,
                password_hash,
                created_by,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(identity.id.as_uuid())
        .bind(identity.username.as_str())
        .bind(identity.email.as_str())
        .bind(identity.password.as_str())
        .bind(identity.created_by.map(IdentityId::into_uuid))
        .bind(identity.created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_insert_error)?;

        let role_id: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM roles WHERE LOWER(role_name) = $1")
                .bind(role.code())
                .fetch_optional(&mut *tx)
                .await?;
        let role_id =
            role_id.ok_or_else(|| AuthError::Internal(format!("role not found: {role}")))?;

        sqlx::query("INSERT INTO identity_roles (identity_id, role_id) VALUES ($1, $2)")
            .bind(identity.id.as_uuid())
            .bind(role_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn list_by_role(
        &self,
        role: Role,
        page: Pagination,
    ) -> AuthResult<Vec<IdentitySummary>> {
        let rows = sqlx::query_as::<_, IdentitySummaryRow>(
            r#"
            SELECT i.id, i.username, i.email, i.created_by, i.created_at
            FROM identities i
            JOIN identity_roles ir ON ir.identity_id = i.id
            JOIN roles r ON r.id = ir.role_id
            WHERE LOWER(r.role_name) = $1 AND i.archived_at IS NULL
            ORDER BY i.created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(role.code())
        .bind(i64::from(page.limit()))
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(IdentitySummaryRow::into_summary).collect())
    }

    async fn list_visible(
        &self,
        scope: Visibility,
        page: Pagination,
    ) -> AuthResult<Vec<IdentitySummary>> {
        let rows = sqlx::query_as::<_, IdentitySummaryRow>(
            r#"
            SELECT id, username, email, created_by, created_at
            FROM identities
            WHERE archived_at IS NULL
              AND ($1::uuid IS NULL OR created_by = $1)
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(scope.creator_filter())
        .bind(i64::from(page.limit()))
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(IdentitySummaryRow::into_summary).collect())
    }
}

// ============================================================================
// Refresh Session Repository Implementation
// ============================================================================

impl RefreshSessionRepository for PgAuthRepository {
    async fn create(&self, session: &RefreshSession) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO refresh_sessions (
                id,
                identity_id,
                token_digest,
                expires_at,
                created_at
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(session.id.as_uuid())
        .bind(session.identity_id.as_uuid())
        .bind(session.token_digest.as_str())
        .bind(session.expires_at)
        .bind(session.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_digest(&self, digest: &TokenDigest) -> AuthResult<Option<RefreshSession>> {
        let row = sqlx::query_as::<_, RefreshSessionRow>(
            r#"
            SELECT id, identity_id, token_digest, expires_at, created_at
            FROM refresh_sessions
            WHERE token_digest = $1
            "#,
        )
        .bind(digest.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(RefreshSessionRow::into_session))
    }

    async fn consume(&self, digest: &TokenDigest) -> AuthResult<Option<RefreshSession>> {
        // single statement: the row lock makes concurrent callers see zero rows
        let row = sqlx::query_as::<_, RefreshSessionRow>(
            r#"
            DELETE FROM refresh_sessions
            WHERE token_digest = $1
            RETURNING id, identity_id, token_digest, expires_at, created_at
            "#,
        )
        .bind(digest.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(RefreshSessionRow::into_session))
    }

    async fn delete(&self, digest: &TokenDigest) -> AuthResult<bool> {
        let deleted = sqlx::query("DELETE FROM refresh_sessions WHERE token_digest = $1")
            .bind(digest.as_str())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn cleanup_expired(&self, now: DateTime<Utc>) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM refresh_sessions WHERE expires_at <= $1")
            .bind(now)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct IdentityRow {
    id: Uuid,
    username: String,
    email: String,
    password_hash: String,
    created_by: Option<Uuid>,
    created_at: DateTime<Utc>,
    archived_at: Option<DateTime<Utc>>,
}

impl IdentityRow {
    fn into_identity(self) -> Identity {
        Identity {
            id: IdentityId::from_uuid(self.id),
            username: Username::from_db(self.username),
            email: Email::from_db(self.email),
            password: PasswordDigest::from_db(self.password_hash),
            created_by: self.created_by.map(IdentityId::from_uuid),
            created_at: self.created_at,
            archived_at: self.archived_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct IdentitySummaryRow {
    id: Uuid,
    username: String,
    email: String,
    created_by: Option<Uuid>,
    created_at: DateTime<Utc>,
}

impl IdentitySummaryRow {
    fn into_summary(self) -> IdentitySummary {
        IdentitySummary {
            id: IdentityId::from_uuid(self.id),
            username: self.username,
            email: self.email,
            created_by: self.created_by.map(IdentityId::from_uuid),
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct RefreshSessionRow {
    id: Uuid,
    identity_id: Uuid,
    token_digest: String,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl RefreshSessionRow {
    fn into_session(self) -> RefreshSession {
        RefreshSession {
            id: RefreshSessionId::from_uuid(self.id),
            identity_id: IdentityId::from_uuid(self.identity_id),
            token_digest: TokenDigest::from_db(self.token_digest),
            expires_at: self.expires_at,
            created_at: self.created_at,
        }
    }
}
