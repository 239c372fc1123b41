//! Listing scope for "visible-to" queries.

use kernel::id::IdentityId;

use super::role::RoleSet;

/// Admins see every row; everyone else sees the rows they created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    All,
    CreatedBy(IdentityId),
}

impl Visibility {
    pub fn for_requester(requester: IdentityId, roles: &RoleSet) -> Self {
        if roles.is_admin() {
            Visibility::All
        } else {
            Visibility::CreatedBy(requester)
        }
    }

    /// Creator filter for SQL: `($1::uuid IS NULL OR created_by = $1)`
    pub fn creator_filter(&self) -> Option<uuid::Uuid> {
        match self {
            Visibility::All => None,
            Visibility::CreatedBy(id) => Some(id.into_uuid()),
        }
    }
}
