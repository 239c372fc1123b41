//! Application Configuration
//!
//! Configuration for the Auth application layer. Built by the binary from the
//! environment; nothing in this crate reads environment variables.

use std::fmt;

use chrono::Duration;

/// Access tokens always live this long.
pub const ACCESS_TOKEN_TTL_MINUTES: i64 = 15;

/// Default refresh token lifetime (`REFRESH_TOKEN_EXPIRY_DAYS`)
pub const DEFAULT_REFRESH_TOKEN_DAYS: i64 = 7;

/// Upper bound accepted for `REFRESH_TOKEN_EXPIRY_DAYS`
pub const MAX_REFRESH_TOKEN_DAYS: i64 = 3650;

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HS256 signing secret for access tokens
    pub access_token_secret: Vec<u8>,
    pub access_token_ttl: Duration,
    pub refresh_token_ttl: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_token_secret: Vec::new(),
            access_token_ttl: Duration::minutes(ACCESS_TOKEN_TTL_MINUTES),
            refresh_token_ttl: Duration::days(DEFAULT_REFRESH_TOKEN_DAYS),
        }
    }
}

impl AuthConfig {
    pub fn new(access_token_secret: impl Into<Vec<u8>>, refresh_token_days: i64) -> Self {
        Self {
            access_token_secret: access_token_secret.into(),
            refresh_token_ttl: Duration::days(refresh_token_days),
            ..Default::default()
        }
    }

    /// Create config with a random signing secret.
    ///
    /// Tokens do not survive a restart.
    pub fn with_random_secret() -> Self {
        Self {
            access_token_secret: platform::crypto::random_bytes(32),
            ..Default::default()
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("access_token_secret", &"[REDACTED]")
            .field("access_token_ttl", &self.access_token_ttl)
            .field("refresh_token_ttl", &self.refresh_token_ttl)
            .finish()
    }
}
