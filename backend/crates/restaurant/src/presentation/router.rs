//! Restaurant Router
//!
//! Paths are absolute so the router merges into the application router as-is.

use std::sync::Arc;

use auth::{AccessTokenCodec, Role, RoleSet, access_gate, role_gate};
use axum::{
    Router,
    routing::{get, post},
};

use crate::domain::repository::{AddressRepository, DishRepository, RestaurantRepository};
use crate::infra::postgres::PgRestaurantRepository;
use crate::presentation::handlers::{self, RestaurantAppState};

/// Create the restaurant router with PostgreSQL repository
pub fn restaurant_router(repo: PgRestaurantRepository, codec: Arc<AccessTokenCodec>) -> Router {
    restaurant_router_generic(repo, codec)
}

/// Create a generic restaurant router for any repository implementation
pub fn restaurant_router_generic<R>(repo: R, codec: Arc<AccessTokenCodec>) -> Router
where
    R: RestaurantRepository + DishRepository + AddressRepository + Send + Sync + 'static,
{
    let state = RestaurantAppState {
        repo: Arc::new(repo),
    };

    let signed_in = access_gate(
        Router::new()
            .route("/restaurants", get(handlers::list_restaurants::<R>))
            .route(
                "/restaurants/{restaurant_id}/dishes",
                get(handlers::list_menu::<R>),
            )
            .route("/user-address", post(handlers::add_address::<R>))
            .route("/distance", get(handlers::distance::<R>)),
        codec.clone(),
    );

    let admin_or_sub_admin = role_gate(
        Router::new()
            .route("/admin-sub-admin/restaurant", post(handlers::create_restaurant::<R>))
            .route("/admin-sub-admin/dish", post(handlers::create_dish::<R>))
            .route(
                "/admin-sub-admin/restaurants",
                get(handlers::list_visible_restaurants::<R>),
            )
            .route(
                "/admin-sub-admin/dishes",
                get(handlers::list_visible_dishes::<R>),
            ),
        codec,
        RoleSet::from([Role::Admin, Role::Subadmin]),
    );

    signed_in.merge(admin_or_sub_admin).with_state(state)
}
