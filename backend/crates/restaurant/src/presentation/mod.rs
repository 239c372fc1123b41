//! Presentation Layer
//!
//! HTTP handlers, DTOs and router. Route gating comes from `auth`.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::RestaurantAppState;
pub use router::{restaurant_router, restaurant_router_generic};
