//! Distance Use Case
//!
//! Great-circle distance from one of the caller's addresses to a restaurant.

use std::sync::Arc;

use kernel::id::{AddressId, IdentityId, RestaurantId};

use crate::domain::repository::{AddressRepository, RestaurantRepository};
use crate::domain::services::distance_km;
use crate::error::{RestaurantError, RestaurantResult};

pub struct DistanceUseCase<R, A>
where
    R: RestaurantRepository,
    A: AddressRepository,
{
    restaurant_repo: Arc<R>,
    address_repo: Arc<A>,
}

impl<R, A> DistanceUseCase<R, A>
where
    R: RestaurantRepository,
    A: AddressRepository,
{
    pub fn new(restaurant_repo: Arc<R>, address_repo: Arc<A>) -> Self {
        Self {
            restaurant_repo,
            address_repo,
        }
    }

    /// Ids arrive raw from the query string.
    pub async fn execute(
        &self,
        owner: IdentityId,
        raw_address_id: Option<&str>,
        raw_restaurant_id: Option<&str>,
    ) -> RestaurantResult<f64> {
        let (Some(raw_address_id), Some(raw_restaurant_id)) = (
            raw_address_id.filter(|s| !s.is_empty()),
            raw_restaurant_id.filter(|s| !s.is_empty()),
        ) else {
            return Err(RestaurantError::validation(
                "restaurant_id and address_id are required",
            ));
        };

        let restaurant_id = RestaurantId::parse_str(raw_restaurant_id)
            .map_err(|_| RestaurantError::validation("Invalid restaurant_id"))?;
        let address_id = AddressId::parse_str(raw_address_id)
            .map_err(|_| RestaurantError::validation("Invalid address_id"))?;

        let address = self
            .address_repo
            .find_owned_address(&address_id, &owner)
            .await?
            .ok_or(RestaurantError::AddressNotFound)?;

        let restaurant = self
            .restaurant_repo
            .find_active_restaurant(&restaurant_id)
            .await?
            .ok_or(RestaurantError::RestaurantNotFound)?;

        Ok(distance_km(address.location, restaurant.location))
    }
}
