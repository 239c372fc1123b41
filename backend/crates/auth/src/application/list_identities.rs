//! List Identities Use Case

use std::sync::Arc;

use kernel::id::IdentityId;
use kernel::pagination::Pagination;

use crate::domain::entity::identity::IdentitySummary;
use crate::domain::repository::IdentityRepository;
use crate::domain::value_object::{
    role::{Role, RoleSet},
    visibility::Visibility,
};
use crate::error::AuthResult;

pub struct ListIdentitiesUseCase<I>
where
    I: IdentityRepository,
{
    identity_repo: Arc<I>,
}

impl<I> ListIdentitiesUseCase<I>
where
    I: IdentityRepository,
{
    pub fn new(identity_repo: Arc<I>) -> Self {
        Self { identity_repo }
    }

    pub async fn by_role(&self, role: Role, page: Pagination) -> AuthResult<Vec<IdentitySummary>> {
        self.identity_repo.list_by_role(role, page).await
    }

    /// Admins see every identity, anyone else only the ones they created.
    pub async fn visible_to(
        &self,
        requester: IdentityId,
        roles: &RoleSet,
        page: Pagination,
    ) -> AuthResult<Vec<IdentitySummary>> {
        let scope = Visibility::for_requester(requester, roles);
        self.identity_repo.list_visible(scope, page).await
    }
}
