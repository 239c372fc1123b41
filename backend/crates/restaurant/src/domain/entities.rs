//! Domain Entities

use chrono::{DateTime, Utc};
use kernel::id::{AddressId, DishId, IdentityId, RestaurantId};

use super::value_objects::{Coordinates, Name, Price};

#[derive(Debug, Clone)]
pub struct Restaurant {
    pub id: RestaurantId,
    pub name: Name,
    pub location: Coordinates,
    pub created_by: IdentityId,
    pub created_at: DateTime<Utc>,
    pub archived_at: Option<DateTime<Utc>>,
}

impl Restaurant {
    pub fn new(name: Name, location: Coordinates, created_by: IdentityId, now: DateTime<Utc>) -> Self {
        Self {
            id: RestaurantId::new(),
            name,
            location,
            created_by,
            created_at: now,
            archived_at: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.archived_at.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct Dish {
    pub id: DishId,
    pub name: Name,
    pub restaurant_id: RestaurantId,
    pub created_by: IdentityId,
    pub price: Price,
    pub created_at: DateTime<Utc>,
    pub archived_at: Option<DateTime<Utc>>,
}

impl Dish {
    pub fn new(
        name: Name,
        restaurant_id: RestaurantId,
        price: Price,
        created_by: IdentityId,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: DishId::new(),
            name,
            restaurant_id,
            created_by,
            price,
            created_at: now,
            archived_at: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.archived_at.is_none()
    }
}

/// A labelled location owned by one identity
#[derive(Debug, Clone)]
pub struct Address {
    pub id: AddressId,
    pub identity_id: IdentityId,
    pub label: Name,
    pub location: Coordinates,
    pub created_at: DateTime<Utc>,
}

impl Address {
    pub fn new(owner: IdentityId, label: Name, location: Coordinates, now: DateTime<Utc>) -> Self {
        Self {
            id: AddressId::new(),
            identity_id: owner,
            label,
            location,
            created_at: now,
        }
    }
}
