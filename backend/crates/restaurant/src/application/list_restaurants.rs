//! List Restaurants Use Case

use std::sync::Arc;

use auth::{RoleSet, Visibility};
use kernel::id::IdentityId;
use kernel::pagination::Pagination;

use crate::domain::entities::Restaurant;
use crate::domain::repository::RestaurantRepository;
use crate::error::RestaurantResult;

pub struct ListRestaurantsUseCase<R>
where
    R: RestaurantRepository,
{
    repo: Arc<R>,
}

impl<R> ListRestaurantsUseCase<R>
where
    R: RestaurantRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Every active restaurant
    pub async fn all(&self, page: Pagination) -> RestaurantResult<Vec<Restaurant>> {
        self.repo.list_restaurants(page).await
    }

    /// Admins see every restaurant, anyone else only the ones they created.
    pub async fn visible_to(
        &self,
        requester: IdentityId,
        roles: &RoleSet,
        page: Pagination,
    ) -> RestaurantResult<Vec<Restaurant>> {
        let scope = Visibility::for_requester(requester, roles);
        self.repo.list_visible_restaurants(scope, page).await
    }
}
