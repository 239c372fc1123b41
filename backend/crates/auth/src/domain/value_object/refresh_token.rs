//! Refresh Token Value Objects
//!
//! The plaintext token exists only in responses and incoming headers. The
//! database holds its SHA-256 digest.

use std::fmt;

use platform::crypto;

/// Random bytes per token; hex encoding doubles the length.
pub const REFRESH_TOKEN_BYTES: usize = 32;

/// Opaque refresh token as handed to the client.
#[derive(Clone, PartialEq, Eq)]
pub struct RefreshToken(String);

impl RefreshToken {
    /// 32 CSPRNG bytes, hex encoded (64 characters).
    pub fn generate() -> Self {
        Self(crypto::random_hex_token(REFRESH_TOKEN_BYTES))
    }

    /// Wrap a token presented by a client. No shape check: unknown tokens
    /// simply fail the lookup.
    pub fn from_client(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn digest(&self) -> TokenDigest {
        TokenDigest(crypto::sha256_hex(self.0.as_bytes()))
    }
}

impl fmt::Debug for RefreshToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RefreshToken([REDACTED])")
    }
}

/// Hex SHA-256 of a refresh token; the lookup key at rest.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenDigest(String);

impl TokenDigest {
    pub fn from_db(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Constant-time equality, for stores that compare in process.
    pub fn matches(&self, other: &TokenDigest) -> bool {
        crypto::constant_time_eq(self.0.as_bytes(), other.0.as_bytes())
    }
}
