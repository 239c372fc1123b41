//! List Dishes Use Case

use std::sync::Arc;

use auth::{RoleSet, Visibility};
use kernel::id::{IdentityId, RestaurantId};
use kernel::pagination::Pagination;

use crate::domain::entities::Dish;
use crate::domain::repository::DishRepository;
use crate::error::{RestaurantError, RestaurantResult};

pub struct ListDishesUseCase<D>
where
    D: DishRepository,
{
    repo: Arc<D>,
}

impl<D> ListDishesUseCase<D>
where
    D: DishRepository,
{
    pub fn new(repo: Arc<D>) -> Self {
        Self { repo }
    }

    /// Active dishes of a restaurant. An unknown restaurant yields an empty list.
    pub async fn by_restaurant(
        &self,
        raw_restaurant_id: &str,
        page: Pagination,
    ) -> RestaurantResult<Vec<Dish>> {
        let restaurant_id = RestaurantId::parse_str(raw_restaurant_id)
            .map_err(|_| RestaurantError::validation("Invalid restaurant ID"))?;

        self.repo
            .list_dishes_by_restaurant(&restaurant_id, page)
            .await
    }

    /// Admins see every dish, anyone else only the ones they created.
    pub async fn visible_to(
        &self,
        requester: IdentityId,
        roles: &RoleSet,
        page: Pagination,
    ) -> RestaurantResult<Vec<Dish>> {
        let scope = Visibility::for_requester(requester, roles);
        self.repo.list_visible_dishes(scope, page).await
    }
}
