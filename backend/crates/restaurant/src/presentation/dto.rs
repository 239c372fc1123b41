//! API DTOs (Data Transfer Objects)

use kernel::id::{AddressId, DishId, IdentityId, RestaurantId};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Dish, Restaurant};

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct CreateRestaurantRequest {
    #[serde(default)]
    pub restaurant_name: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateDishRequest {
    #[serde(default)]
    pub dish_name: String,
    #[serde(default)]
    pub restaurant_id: String,
    pub price: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAddressRequest {
    #[serde(default)]
    pub label: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// GET /distance query string
#[derive(Debug, Clone, Deserialize)]
pub struct DistanceQuery {
    pub restaurant_id: Option<String>,
    pub address_id: Option<String>,
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct CreateRestaurantResponse {
    pub message: &'static str,
    pub restaurant_id: RestaurantId,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateDishResponse {
    pub message: &'static str,
    pub dish_id: DishId,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateAddressResponse {
    pub message: &'static str,
    pub address_id: AddressId,
}

#[derive(Debug, Clone, Serialize)]
pub struct DistanceResponse {
    pub distance_km: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RestaurantResponse {
    pub id: RestaurantId,
    #[serde(rename = "restaurantname")]
    pub name: String,
    pub created_by: IdentityId,
    pub lat: f64,
    pub lng: f64,
}

impl From<Restaurant> for RestaurantResponse {
    fn from(restaurant: Restaurant) -> Self {
        Self {
            id: restaurant.id,
            lat: restaurant.location.lat(),
            lng: restaurant.location.lng(),
            name: restaurant.name.into_string(),
            created_by: restaurant.created_by,
        }
    }
}

/// Menu entry under GET /restaurants/{restaurant_id}/dishes
#[derive(Debug, Clone, Serialize)]
pub struct MenuDishResponse {
    pub id: DishId,
    #[serde(rename = "dishname")]
    pub name: String,
    pub price: f64,
}

impl From<Dish> for MenuDishResponse {
    fn from(dish: Dish) -> Self {
        Self {
            id: dish.id,
            price: dish.price.value(),
            name: dish.name.into_string(),
        }
    }
}

/// Entry of the admin / sub-admin dish listing
#[derive(Debug, Clone, Serialize)]
pub struct DishResponse {
    pub id: DishId,
    pub name: String,
    pub restaurant_id: RestaurantId,
    pub created_by: IdentityId,
    pub price: f64,
}

impl From<Dish> for DishResponse {
    fn from(dish: Dish) -> Self {
        Self {
            id: dish.id,
            restaurant_id: dish.restaurant_id,
            created_by: dish.created_by,
            price: dish.price.value(),
            name: dish.name.into_string(),
        }
    }
}
