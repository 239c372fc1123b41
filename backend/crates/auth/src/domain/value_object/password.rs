//! Password Value Objects
//!
//! Delegates to `platform::password` for hashing and verification and maps
//! its errors onto [`AuthError`].

use std::fmt;

use platform::password::{ClearTextPassword, HashedPassword, PasswordPolicyError};

use crate::error::{AuthError, AuthResult};

/// A password chosen for a new account. Constructing one applies the policy.
pub struct NewPassword(ClearTextPassword);

impl NewPassword {
    pub fn new(raw: String) -> AuthResult<Self> {
        ClearTextPassword::new(raw)
            .map(Self)
            .map_err(|e| AuthError::Validation(policy_message(&e)))
    }

    /// Argon2id hash, computed off the async runtime.
    pub async fn hash(self) -> AuthResult<PasswordDigest> {
        let hashed = self
            .0
            .hash_blocking()
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?;
        Ok(PasswordDigest(hashed.as_phc_string().to_string()))
    }
}

impl fmt::Debug for NewPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NewPassword([REDACTED])")
    }
}

fn policy_message(err: &PasswordPolicyError) -> String {
    match err {
        PasswordPolicyError::EmptyOrWhitespace => "password is required".to_string(),
        other => other.to_string(),
    }
}

/// Stored PHC string.
///
/// Unparseable values are kept as-is and simply never verify.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    pub fn from_db(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Compare a submitted password. No policy check is applied.
    pub async fn verify(&self, submitted: String) -> bool {
        match HashedPassword::from_phc_string(self.0.as_str()) {
            Ok(hashed) => {
                hashed
                    .verify_blocking(ClearTextPassword::for_verification(submitted))
                    .await
            }
            Err(_) => {
                tracing::warn!("stored password hash is not a valid PHC string");
                false
            }
        }
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest([HASH])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_maps_to_validation() {
        assert!(matches!(
            NewPassword::new("short".into()),
            Err(AuthError::Validation(_))
        ));
        assert!(matches!(
            NewPassword::new("   ".into()),
            Err(AuthError::Validation(msg)) if msg == "password is required"
        ));
    }

    #[tokio::test]
    async fn test_hash_then_verify() {
        let digest = NewPassword::new("Orchard-Lane-19".into())
            .unwrap()
            .hash()
            .await
            .unwrap();
        assert!(digest.verify("Orchard-Lane-19".into()).await);
        assert!(!digest.verify("orchard-lane-19".into()).await);
    }

    #[tokio::test]
    async fn test_malformed_digest_never_verifies() {
        let digest = PasswordDigest::from_db("$2a$12$not-argon");
        assert!(!digest.verify("anything".into()).await);
    }
}
