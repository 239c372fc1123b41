//! Application Layer
//!
//! Use cases for restaurants, dishes, addresses and distance.

pub mod add_address;
pub mod create_dish;
pub mod create_restaurant;
pub mod distance;
pub mod list_dishes;
pub mod list_restaurants;

// Re-exports
pub use add_address::{AddAddressInput, AddAddressUseCase};
pub use create_dish::{CreateDishInput, CreateDishUseCase};
pub use create_restaurant::{CreateRestaurantInput, CreateRestaurantUseCase};
pub use distance::DistanceUseCase;
pub use list_dishes::ListDishesUseCase;
pub use list_restaurants::ListRestaurantsUseCase;
