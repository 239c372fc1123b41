//! Bootstrap Admin Use Case
//!
//! Creates the first admin at startup so the admin-only routes are
//! reachable on an empty database.

use std::sync::Arc;

use kernel::id::IdentityId;

use crate::application::create_identity::{CreateIdentityInput, CreateIdentityUseCase};
use crate::domain::repository::IdentityRepository;
use crate::domain::value_object::{email::Email, role::Role};
use crate::error::{AuthError, AuthResult};

const BOOTSTRAP_USERNAME: &str = "admin";

pub struct BootstrapAdminUseCase<I>
where
    I: IdentityRepository,
{
    identity_repo: Arc<I>,
}

impl<I> BootstrapAdminUseCase<I>
where
    I: IdentityRepository,
{
    pub fn new(identity_repo: Arc<I>) -> Self {
        Self { identity_repo }
    }

    /// Returns the new id, or `None` when the email is already registered.
    pub async fn execute(&self, email: &str, password: String) -> AuthResult<Option<IdentityId>> {
        let normalized = Email::new(email)?;
        if self.identity_repo.exists_active_by_email(&normalized).await? {
            tracing::debug!(email = %normalized, "Bootstrap admin already present");
            return Ok(None);
        }

        let created = CreateIdentityUseCase::new(self.identity_repo.clone())
            .execute(CreateIdentityInput {
                username: BOOTSTRAP_USERNAME.to_string(),
                email: normalized.as_str().to_string(),
                password,
                role: Role::Admin,
                created_by: None,
            })
            .await;

        match created {
            Ok(id) => {
                tracing::info!(identity_id = %id, "Bootstrap admin provisioned");
                Ok(Some(id))
            }
            // another instance won the race
            Err(AuthError::EmailTaken) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
