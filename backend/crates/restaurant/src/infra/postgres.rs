//! PostgreSQL Repository Implementations

use auth::Visibility;
use chrono::{DateTime, Utc};
use kernel::id::{AddressId, DishId, IdentityId, RestaurantId};
use kernel::pagination::Pagination;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{Address, Dish, Restaurant};
use crate::domain::repository::{AddressRepository, DishRepository, RestaurantRepository};
use crate::domain::value_objects::{Coordinates, Name, Price};
use crate::error::{RestaurantError, RestaurantResult};

/// PostgreSQL-backed restaurant repository
#[derive(Clone)]
pub struct PgRestaurantRepository {
    pool: PgPool,
}

impl PgRestaurantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23503"))
}

// ============================================================================
// Restaurant Repository Implementation
// ============================================================================

impl RestaurantRepository for PgRestaurantRepository {
    async fn create_restaurant(&self, restaurant: &Restaurant) -> RestaurantResult<()> {
        sqlx::query(
            r#"
            INSERT INTO restaurants (
                id,
                name,
                lat,
                lng,
                created_by,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(restaurant.id.as_uuid())
        .bind(restaurant.name.as_str())
        .bind(restaurant.location.lat())
        .bind(restaurant.location.lng())
        .bind(restaurant.created_by.as_uuid())
        .bind(restaurant.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_active_restaurant(
        &self,
        id: &RestaurantId,
    ) -> RestaurantResult<Option<Restaurant>> {
        let row = sqlx::query_as::<_, RestaurantRow>(
            r#"
            SELECT id, name, lat, lng, created_by, created_at, archived_at
            FROM restaurants
            WHERE id = $1 AND archived_at IS NULL
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(RestaurantRow::into_restaurant))
    }

    async fn list_restaurants(&self, page: Pagination) -> RestaurantResult<Vec<Restaurant>> {
        self.list_visible_restaurants(Visibility::All, page).await
    }

    async fn list_visible_restaurants(
        &self,
        scope: Visibility,
        page: Pagination,
    ) -> RestaurantResult<Vec<Restaurant>> {
        let rows = sqlx::query_as::<_, RestaurantRow>(
            r#"
            SELECT id, name, lat, lng, created_by, created_at, archived_at
            FROM restaurants
            WHERE archived_at IS NULL
              AND ($1::uuid IS NULL OR created_by = $1)
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(scope.creator_filter())
        .bind(i64::from(page.limit()))
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(RestaurantRow::into_restaurant).collect())
    }
}

// ============================================================================
// Dish Repository Implementation
// ============================================================================

impl DishRepository for PgRestaurantRepository {
    async fn create_dish(&self, dish: &Dish) -> RestaurantResult<()> {
        sqlx::query(
            r#"
            INSERT INTO dishes (
                id,
                name,
                restaurant_id,
                created_by,
                price,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(dish.id.as_uuid())
        .bind(dish.name.as_str())
        .bind(dish.restaurant_id.as_uuid())
        .bind(dish.created_by.as_uuid())
        .bind(dish.price.value())
        .bind(dish.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                RestaurantError::RestaurantNotFound
            } else {
                RestaurantError::Database(e)
            }
        })?;

        Ok(())
    }

    async fn list_dishes_by_restaurant(
        &self,
        restaurant_id: &RestaurantId,
        page: Pagination,
    ) -> RestaurantResult<Vec<Dish>> {
        let rows = sqlx::query_as::<_, DishRow>(
            r#"
            SELECT id, name, restaurant_id, created_by, price, created_at, archived_at
            FROM dishes
            WHERE restaurant_id = $1 AND archived_at IS NULL
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(restaurant_id.as_uuid())
        .bind(i64::from(page.limit()))
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(DishRow::into_dish).collect())
    }

    async fn list_visible_dishes(
        &self,
        scope: Visibility,
        page: Pagination,
    ) -> RestaurantResult<Vec<Dish>> {
        let rows = sqlx::query_as::<_, DishRow>(
            r#"
            SELECT id, name, restaurant_id, created_by, price, created_at, archived_at
            FROM dishes
            WHERE archived_at IS NULL
              AND ($1::uuid IS NULL OR created_by = $1)
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(scope.creator_filter())
        .bind(i64::from(page.limit()))
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(DishRow::into_dish).collect())
    }
}

// ============================================================================
// Address Repository Implementation
// ============================================================================

impl AddressRepository for PgRestaurantRepository {
    async fn create_address(&self, address: &Address) -> RestaurantResult<()> {
        sqlx::query(
            r#"
            INSERT INTO addresses (
                id,
                identity_id,
                label,
                lat,
                lng,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(address.id.as_uuid())
        .bind(address.identity_id.as_uuid())
        .bind(address.label.as_str())
        .bind(address.location.lat())
        .bind(address.location.lng())
        .bind(address.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_owned_address(
        &self,
        id: &AddressId,
        owner: &IdentityId,
    ) -> RestaurantResult<Option<Address>> {
        let row = sqlx::query_as::<_, AddressRow>(
            r#"
            SELECT id, identity_id, label, lat, lng, created_at
            FROM addresses
            WHERE id = $1 AND identity_id = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(owner.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AddressRow::into_address))
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct RestaurantRow {
    id: Uuid,
    name: String,
    lat: f64,
    lng: f64,
    created_by: Uuid,
    created_at: DateTime<Utc>,
    archived_at: Option<DateTime<Utc>>,
}

impl RestaurantRow {
    fn into_restaurant(self) -> Restaurant {
        Restaurant {
            id: RestaurantId::from_uuid(self.id),
            name: Name::from_db(self.name),
            location: Coordinates::from_db(self.lat, self.lng),
            created_by: IdentityId::from_uuid(self.created_by),
            created_at: self.created_at,
            archived_at: self.archived_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct DishRow {
    id: Uuid,
    name: String,
    restaurant_id: Uuid,
    created_by: Uuid,
    price: f64,
    created_at: DateTime<Utc>,
    archived_at: Option<DateTime<Utc>>,
}

impl DishRow {
    fn into_dish(self) -> Dish {
        Dish {
            id: DishId::from_uuid(self.id),
            name: Name::from_db(self.name),
            restaurant_id: RestaurantId::from_uuid(self.restaurant_id),
            created_by: IdentityId::from_uuid(self.created_by),
            price: Price::from_db(self.price),
            created_at: self.created_at,
            archived_at: self.archived_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct AddressRow {
    id: Uuid,
    identity_id: Uuid,
    label: String,
    lat: f64,
    lng: f64,
    created_at: DateTime<Utc>,
}

impl AddressRow {
    fn into_address(self) -> Address {
        Address {
            id: AddressId::from_uuid(self.id),
            identity_id: IdentityId::from_uuid(self.identity_id),
            label: Name::from_db(self.label),
            location: Coordinates::from_db(self.lat, self.lng),
            created_at: self.created_at,
        }
    }
}
