//! Restaurant Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, distance service, repository traits
//! - `application/` - Use cases
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Restaurants and dishes, created by admins and sub-admins
//! - "Visible-to" listings: admins see every row, sub-admins their own
//! - Per-identity delivery addresses
//! - Great-circle distance between an address and a restaurant
//!
//! Authentication and role checks come from the `auth` crate's gates.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use error::{RestaurantError, RestaurantResult};
pub use infra::postgres::PgRestaurantRepository;
pub use presentation::router::{restaurant_router, restaurant_router_generic};
