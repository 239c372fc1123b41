//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (Restaurant, Dish, Address)
//! - Domain value objects (Coordinates, Price, Name)
//! - Domain services (great-circle distance)
//! - Repository traits (interfaces)

pub mod entities;
pub mod repository;
pub mod services;
pub mod value_objects;
