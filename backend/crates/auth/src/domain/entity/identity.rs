//! Identity Entity
//!
//! An account that can sign in: admin, subadmin or plain user. Roles live in
//! a separate association and are loaded on demand.

use chrono::{DateTime, Utc};
use kernel::id::IdentityId;

use crate::domain::value_object::{email::Email, password::PasswordDigest, username::Username};

#[derive(Debug, Clone)]
pub struct Identity {
    pub id: IdentityId,
    pub username: Username,
    pub email: Email,
    pub password: PasswordDigest,
    /// `None` for the bootstrap admin
    pub created_by: Option<IdentityId>,
    pub created_at: DateTime<Utc>,
    pub archived_at: Option<DateTime<Utc>>,
}

impl Identity {
    pub fn new(
        username: Username,
        email: Email,
        password: PasswordDigest,
        created_by: Option<IdentityId>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: IdentityId::new(),
            username,
            email,
            password,
            created_by,
            created_at: now,
            archived_at: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.archived_at.is_none()
    }

    pub fn summary(&self) -> IdentitySummary {
        IdentitySummary {
            id: self.id,
            username: self.username.as_str().to_string(),
            email: self.email.as_str().to_string(),
            created_by: self.created_by,
            created_at: self.created_at,
        }
    }
}

/// Listing projection; never carries the password digest.
#[derive(Debug, Clone)]
pub struct IdentitySummary {
    pub id: IdentityId,
    pub username: String,
    pub email: String,
    pub created_by: Option<IdentityId>,
    pub created_at: DateTime<Utc>,
}
