//! Display name of an identity.

use serde::Serialize;

use crate::error::{AuthError, AuthResult};

const USERNAME_MAX_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Username(String);

impl Username {
    /// Trimmed, non-empty, at most 100 characters, no control characters
    pub fn new(raw: impl AsRef<str>) -> AuthResult<Self> {
        let trimmed = raw.as_ref().trim();

        if trimmed.is_empty() {
            return Err(AuthError::Validation("username is required".into()));
        }
        if trimmed.chars().count() > USERNAME_MAX_CHARS {
            return Err(AuthError::Validation(format!(
                "username must be at most {USERNAME_MAX_CHARS} characters"
            )));
        }
        if trimmed.chars().any(char::is_control) {
            return Err(AuthError::Validation(
                "username contains invalid characters".into(),
            ));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn from_db(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
