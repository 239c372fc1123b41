//! Create Identity Use Case
//!
//! Provisions an admin, subadmin or user account with exactly one role.

use std::sync::Arc;

use chrono::Utc;
use kernel::id::IdentityId;

use crate::domain::entity::identity::Identity;
use crate::domain::repository::IdentityRepository;
use crate::domain::value_object::{
    email::Email, password::NewPassword, role::Role, username::Username,
};
use crate::error::{AuthError, AuthResult};

pub struct CreateIdentityInput {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    /// The provisioning identity; `None` only for the bootstrap admin
    pub created_by: Option<IdentityId>,
}

pub struct CreateIdentityUseCase<I>
where
    I: IdentityRepository,
{
    identity_repo: Arc<I>,
}

impl<I> CreateIdentityUseCase<I>
where
    I: IdentityRepository,
{
    pub fn new(identity_repo: Arc<I>) -> Self {
        Self { identity_repo }
    }

    pub async fn execute(&self, input: CreateIdentityInput) -> AuthResult<IdentityId> {
        // validation happens before any persistence
        let username = Username::new(&input.username)?;
        let email = Email::new(&input.email)?;
        let password = NewPassword::new(input.password)?;

        if self.identity_repo.exists_active_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        let digest = password.hash().await?;
        let identity = Identity::new(username, email, digest, input.created_by, Utc::now());

        // a concurrent insert of the same email still ends as EmailTaken
        self.identity_repo
            .create_with_role(&identity, input.role)
            .await?;

        tracing::info!(
            identity_id = %identity.id,
            role = %input.role,
            created_by = ?input.created_by.map(|id| id.to_string()),
            "Identity created"
        );

        Ok(identity.id)
    }
}
