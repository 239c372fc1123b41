//! Access Token Codec
//!
//! HS256 JWTs carrying the subject identity and its roles. Timestamps have
//! second precision and a token is rejected once `exp <= now`.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use kernel::id::IdentityId;
use serde::{Deserialize, Serialize};

use crate::application::config::AuthConfig;
use crate::domain::value_object::role::RoleSet;
use crate::error::{AuthError, AuthResult};

/// Wire claims
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    roles: RoleSet,
    iat: i64,
    exp: i64,
}

/// Claims of a verified access token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessClaims {
    pub identity_id: IdentityId,
    pub roles: RoleSet,
    pub issued_at: i64,
    pub expires_at: i64,
}

/// Signs and verifies access tokens with a fixed secret.
pub struct AccessTokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl AccessTokenCodec {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // expiry is compared against the caller's clock in `verify`
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(&config.access_token_secret),
            decoding_key: DecodingKey::from_secret(&config.access_token_secret),
            validation,
            ttl: config.access_token_ttl,
        }
    }

    /// Sign a token for `subject` valid until `now + ttl`.
    pub fn issue(
        &self,
        subject: IdentityId,
        roles: &RoleSet,
        now: DateTime<Utc>,
    ) -> AuthResult<String> {
        let claims = Claims {
            sub: subject.to_string(),
            roles: roles.clone(),
            iat: now.timestamp(),
            // whole seconds: expiry may land up to 1s before `now + ttl`
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("failed to sign access token: {e}")))
    }

    /// Check signature, structure, subject and expiry.
    ///
    /// Every failure is [`AuthError::InvalidOrExpiredToken`]; the cause is
    /// only logged.
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> AuthResult<AccessClaims> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            tracing::debug!(reason = ?e.kind(), "access token rejected");
            AuthError::InvalidOrExpiredToken
        })?;
        let claims = data.claims;

        if claims.exp <= now.timestamp() {
            tracing::debug!(exp = claims.exp, "access token expired");
            return Err(AuthError::InvalidOrExpiredToken);
        }

        let identity_id =
            IdentityId::parse_str(&claims.sub).map_err(|_| AuthError::InvalidOrExpiredToken)?;

        Ok(AccessClaims {
            identity_id,
            roles: claims.roles,
            issued_at: claims.iat,
            expires_at: claims.exp,
        })
    }
}
