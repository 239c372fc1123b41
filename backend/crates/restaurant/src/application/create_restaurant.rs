//! Create Restaurant Use Case

use std::sync::Arc;

use chrono::Utc;
use kernel::id::{IdentityId, RestaurantId};

use crate::domain::entities::Restaurant;
use crate::domain::repository::RestaurantRepository;
use crate::domain::value_objects::{Coordinates, Name};
use crate::error::RestaurantResult;

pub struct CreateRestaurantInput {
    pub name: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub created_by: IdentityId,
}

pub struct CreateRestaurantUseCase<R>
where
    R: RestaurantRepository,
{
    repo: Arc<R>,
}

impl<R> CreateRestaurantUseCase<R>
where
    R: RestaurantRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: CreateRestaurantInput) -> RestaurantResult<RestaurantId> {
        let name = Name::new(&input.name, "restaurant_name")?;
        let location = Coordinates::new(input.lat, input.lng)?;

        let restaurant = Restaurant::new(name, location, input.created_by, Utc::now());
        self.repo.create_restaurant(&restaurant).await?;

        tracing::info!(
            restaurant_id = %restaurant.id,
            created_by = %restaurant.created_by,
            "Restaurant created"
        );

        Ok(restaurant.id)
    }
}
