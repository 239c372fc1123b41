//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use auth::Visibility;
use kernel::id::{AddressId, IdentityId, RestaurantId};
use kernel::pagination::Pagination;

use super::entities::{Address, Dish, Restaurant};
use crate::error::RestaurantResult;

/// Restaurant repository trait
#[trait_variant::make(RestaurantRepository: Send)]
pub trait LocalRestaurantRepository {
    async fn create_restaurant(&self, restaurant: &Restaurant) -> RestaurantResult<()>;

    /// Non-archived restaurant by id
    async fn find_active_restaurant(&self, id: &RestaurantId)
    -> RestaurantResult<Option<Restaurant>>;

    /// Active restaurants, newest first
    async fn list_restaurants(&self, page: Pagination) -> RestaurantResult<Vec<Restaurant>>;

    /// Active restaurants visible in `scope`, newest first
    async fn list_visible_restaurants(
        &self,
        scope: Visibility,
        page: Pagination,
    ) -> RestaurantResult<Vec<Restaurant>>;
}

/// Dish repository trait
#[trait_variant::make(DishRepository: Send)]
pub trait LocalDishRepository {
    /// Fails with `RestaurantNotFound` if the restaurant vanished meanwhile
    async fn create_dish(&self, dish: &Dish) -> RestaurantResult<()>;

    /// Active dishes of one restaurant, newest first
    async fn list_dishes_by_restaurant(
        &self,
        restaurant_id: &RestaurantId,
        page: Pagination,
    ) -> RestaurantResult<Vec<Dish>>;

    /// Active dishes visible in `scope`, newest first
    async fn list_visible_dishes(
        &self,
        scope: Visibility,
        page: Pagination,
    ) -> RestaurantResult<Vec<Dish>>;
}

/// Address repository trait
#[trait_variant::make(AddressRepository: Send)]
pub trait LocalAddressRepository {
    async fn create_address(&self, address: &Address) -> RestaurantResult<()>;

    /// The address, only if `owner` owns it
    async fn find_owned_address(
        &self,
        id: &AddressId,
        owner: &IdentityId,
    ) -> RestaurantResult<Option<Address>>;
}
