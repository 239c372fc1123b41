//! Create Dish Use Case
//!
//! Input is validated in full before the restaurant lookup.

use std::sync::Arc;

use chrono::Utc;
use kernel::id::{DishId, IdentityId, RestaurantId};

use crate::domain::entities::Dish;
use crate::domain::repository::{DishRepository, RestaurantRepository};
use crate::domain::value_objects::{Name, Price};
use crate::error::{RestaurantError, RestaurantResult};

pub struct CreateDishInput {
    pub name: String,
    /// Raw id from the request body
    pub restaurant_id: String,
    pub price: Option<f64>,
    pub created_by: IdentityId,
}

pub struct CreateDishUseCase<R, D>
where
    R: RestaurantRepository,
    D: DishRepository,
{
    restaurant_repo: Arc<R>,
    dish_repo: Arc<D>,
}

impl<R, D> CreateDishUseCase<R, D>
where
    R: RestaurantRepository,
    D: DishRepository,
{
    pub fn new(restaurant_repo: Arc<R>, dish_repo: Arc<D>) -> Self {
        Self {
            restaurant_repo,
            dish_repo,
        }
    }

    pub async fn execute(&self, input: CreateDishInput) -> RestaurantResult<DishId> {
        let name = Name::new(&input.name, "dish_name")?;

        let raw_id = input.restaurant_id.trim();
        if raw_id.is_empty() {
            return Err(RestaurantError::validation("restaurant_id is required"));
        }
        let restaurant_id = RestaurantId::parse_str(raw_id)
            .map_err(|_| RestaurantError::validation("Invalid restaurant_id format"))?;

        let price = Price::new(input.price)?;

        if self
            .restaurant_repo
            .find_active_restaurant(&restaurant_id)
            .await?
            .is_none()
        {
            return Err(RestaurantError::RestaurantNotFound);
        }

        let dish = Dish::new(name, restaurant_id, price, input.created_by, Utc::now());
        self.dish_repo.create_dish(&dish).await?;

        tracing::info!(
            dish_id = %dish.id,
            restaurant_id = %dish.restaurant_id,
            created_by = %dish.created_by,
            "Dish created"
        );

        Ok(dish.id)
    }
}
