//! HTTP Handlers

use std::sync::Arc;

use auth::AuthContext;
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use kernel::extract::Json as JsonBody;
use kernel::pagination::{PageQuery, Pagination};

use crate::application::{
    AddAddressInput, AddAddressUseCase, CreateDishInput, CreateDishUseCase, CreateRestaurantInput,
    CreateRestaurantUseCase, DistanceUseCase, ListDishesUseCase, ListRestaurantsUseCase,
};
use crate::domain::repository::{AddressRepository, DishRepository, RestaurantRepository};
use crate::error::RestaurantResult;
use crate::presentation::dto::{
    CreateAddressRequest, CreateAddressResponse, CreateDishRequest, CreateDishResponse,
    CreateRestaurantRequest, CreateRestaurantResponse, DishResponse, DistanceQuery,
    DistanceResponse, MenuDishResponse, RestaurantResponse,
};

/// Shared state for restaurant handlers
pub struct RestaurantAppState<R>
where
    R: RestaurantRepository + DishRepository + AddressRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

impl<R> Clone for RestaurantAppState<R>
where
    R: RestaurantRepository + DishRepository + AddressRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
        }
    }
}

// ============================================================================
// Any signed-in identity
// ============================================================================

/// GET /restaurants
pub async fn list_restaurants<R>(
    State(state): State<RestaurantAppState<R>>,
    Query(page): Query<PageQuery>,
) -> RestaurantResult<Json<Vec<RestaurantResponse>>>
where
    R: RestaurantRepository + DishRepository + AddressRepository + Send + Sync + 'static,
{
    let rows = ListRestaurantsUseCase::new(state.repo.clone())
        .all(Pagination::from(page))
        .await?;

    Ok(Json(rows.into_iter().map(RestaurantResponse::from).collect()))
}

/// GET /restaurants/{restaurant_id}/dishes
pub async fn list_menu<R>(
    State(state): State<RestaurantAppState<R>>,
    Path(restaurant_id): Path<String>,
    Query(page): Query<PageQuery>,
) -> RestaurantResult<Json<Vec<MenuDishResponse>>>
where
    R: RestaurantRepository + DishRepository + AddressRepository + Send + Sync + 'static,
{
    let rows = ListDishesUseCase::new(state.repo.clone())
        .by_restaurant(&restaurant_id, Pagination::from(page))
        .await?;

    Ok(Json(rows.into_iter().map(MenuDishResponse::from).collect()))
}

/// POST /user-address
pub async fn add_address<R>(
    State(state): State<RestaurantAppState<R>>,
    caller: AuthContext,
    JsonBody(req): JsonBody<CreateAddressRequest>,
) -> RestaurantResult<(StatusCode, Json<CreateAddressResponse>)>
where
    R: RestaurantRepository + DishRepository + AddressRepository + Send + Sync + 'static,
{
    let address_id = AddAddressUseCase::new(state.repo.clone())
        .execute(AddAddressInput {
            owner: caller.identity_id,
            label: req.label,
            lat: req.lat,
            lng: req.lng,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateAddressResponse {
            message: "Address added successfully",
            address_id,
        }),
    ))
}

/// GET /distance?restaurant_id=..&address_id=..
pub async fn distance<R>(
    State(state): State<RestaurantAppState<R>>,
    caller: AuthContext,
    Query(query): Query<DistanceQuery>,
) -> RestaurantResult<Json<DistanceResponse>>
where
    R: RestaurantRepository + DishRepository + AddressRepository + Send + Sync + 'static,
{
    let distance_km = DistanceUseCase::new(state.repo.clone(), state.repo.clone())
        .execute(
            caller.identity_id,
            query.address_id.as_deref(),
            query.restaurant_id.as_deref(),
        )
        .await?;

    Ok(Json(DistanceResponse { distance_km }))
}

// ============================================================================
// Admin / sub-admin
// ============================================================================

/// POST /admin-sub-admin/restaurant
pub async fn create_restaurant<R>(
    State(state): State<RestaurantAppState<R>>,
    caller: AuthContext,
    JsonBody(req): JsonBody<CreateRestaurantRequest>,
) -> RestaurantResult<(StatusCode, Json<CreateRestaurantResponse>)>
where
    R: RestaurantRepository + DishRepository + AddressRepository + Send + Sync + 'static,
{
    let restaurant_id = CreateRestaurantUseCase::new(state.repo.clone())
        .execute(CreateRestaurantInput {
            name: req.restaurant_name,
            lat: req.lat,
            lng: req.lng,
            created_by: caller.identity_id,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateRestaurantResponse {
            message: "Restaurant created successfully",
            restaurant_id,
        }),
    ))
}

/// POST /admin-sub-admin/dish
pub async fn create_dish<R>(
    State(state): State<RestaurantAppState<R>>,
    caller: AuthContext,
    JsonBody(req): JsonBody<CreateDishRequest>,
) -> RestaurantResult<(StatusCode, Json<CreateDishResponse>)>
where
    R: RestaurantRepository + DishRepository + AddressRepository + Send + Sync + 'static,
{
    let dish_id = CreateDishUseCase::new(state.repo.clone(), state.repo.clone())
        .execute(CreateDishInput {
            name: req.dish_name,
            restaurant_id: req.restaurant_id,
            price: req.price,
            created_by: caller.identity_id,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateDishResponse {
            message: "Dish created successfully",
            dish_id,
        }),
    ))
}

/// GET /admin-sub-admin/restaurants
pub async fn list_visible_restaurants<R>(
    State(state): State<RestaurantAppState<R>>,
    caller: AuthContext,
    Query(page): Query<PageQuery>,
) -> RestaurantResult<Json<Vec<RestaurantResponse>>>
where
    R: RestaurantRepository + DishRepository + AddressRepository + Send + Sync + 'static,
{
    let rows = ListRestaurantsUseCase::new(state.repo.clone())
        .visible_to(caller.identity_id, &caller.roles, Pagination::from(page))
        .await?;

    Ok(Json(rows.into_iter().map(RestaurantResponse::from).collect()))
}

/// GET /admin-sub-admin/dishes
pub async fn list_visible_dishes<R>(
    State(state): State<RestaurantAppState<R>>,
    caller: AuthContext,
    Query(page): Query<PageQuery>,
) -> RestaurantResult<Json<Vec<DishResponse>>>
where
    R: RestaurantRepository + DishRepository + AddressRepository + Send + Sync + 'static,
{
    let rows = ListDishesUseCase::new(state.repo.clone())
        .visible_to(caller.identity_id, &caller.roles, Pagination::from(page))
        .await?;

    Ok(Json(rows.into_iter().map(DishResponse::from).collect()))
}
