//! Refresh Session Entity
//!
//! One row per outstanding refresh token. A session is valid until
//! `expires_at`; it ends earlier when consumed by a rotation or deleted by
//! sign-out.

use chrono::{DateTime, Duration, Utc};
use kernel::id::{IdentityId, RefreshSessionId};

use crate::domain::value_object::refresh_token::{RefreshToken, TokenDigest};
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone)]
pub struct RefreshSession {
    pub id: RefreshSessionId,
    pub identity_id: IdentityId,
    pub token_digest: TokenDigest,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl RefreshSession {
    /// Mint a new token for `owner`. The plaintext is returned once and never
    /// stored.
    ///
    /// Fails when `now + ttl` is outside the representable date range.
    pub fn issue(
        owner: IdentityId,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> AuthResult<(Self, RefreshToken)> {
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| AuthError::Internal(format!("refresh session ttl out of range: {ttl}")))?;

        let token = RefreshToken::generate();
        let session = Self {
            id: RefreshSessionId::new(),
            identity_id: owner,
            token_digest: token.digest(),
            expires_at,
            created_at: now,
        };
        Ok((session, token))
    }

    /// Expired at exactly `expires_at`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_stores_digest_only() {
        let now = Utc::now();
        let (session, token) =
            RefreshSession::issue(IdentityId::new(), now, Duration::days(7)).unwrap();
        assert_eq!(session.token_digest, token.digest());
        assert_ne!(session.token_digest.as_str(), token.as_str());
        assert_eq!(session.expires_at, now + Duration::days(7));
    }

    #[test]
    fn test_expiry_boundary() {
        let now = Utc::now();
        let (session, _) =
            RefreshSession::issue(IdentityId::new(), now, Duration::seconds(60)).unwrap();
        assert!(!session.is_expired(now + Duration::seconds(59)));
        assert!(session.is_expired(now + Duration::seconds(60)));
    }

    #[test]
    fn test_unrepresentable_expiry_is_an_error() {
        let result = RefreshSession::issue(
            IdentityId::new(),
            Utc::now(),
            Duration::days(100_000_000),
        );
        assert!(matches!(result, Err(AuthError::Internal(_))));
    }
}
