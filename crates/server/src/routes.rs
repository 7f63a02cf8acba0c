use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

pub mod accounts;
pub mod auth;
pub mod bookings;
pub mod catalog;
pub mod orders;
pub mod restaurants;

use crate::{observability, openapi};
use auth::ServerState;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK")))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: public, staff and admin routes behind
/// the principal-resolving middleware.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let ops = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(observability::metrics))
        .route("/api-docs/openapi.json", get(openapi::openapi_json));

    let auth_routes = Router::new()
        .route("/admin/login", post(auth::admin_login))
        .route("/restaurant/login", post(auth::restaurant_login))
        .route("/users/login", post(auth::user_login));

    let bookings = Router::new()
        .route("/bookings", post(bookings::create).get(bookings::list))
        .route("/bookings/:id", get(bookings::get).put(bookings::update).delete(bookings::delete));

    // GET /orders/:id takes a restaurant id; PUT takes an order id.
    let orders = Router::new()
        .route("/orders", post(orders::create).get(orders::list))
        .route("/orders/:id", get(orders::list_for_restaurant).put(orders::update_status))
        .route("/orders/:id/detail", get(orders::detail));

    let catalog = Router::new()
        .route("/tables", post(catalog::create_table).get(catalog::list_tables))
        .route(
            "/tables/:id",
            get(catalog::get_table).put(catalog::update_table).delete(catalog::delete_table),
        )
        .route("/categories", post(catalog::create_category).get(catalog::list_categories))
        .route("/categories/:id", axum::routing::put(catalog::update_category).delete(catalog::delete_category))
        .route("/menus", post(catalog::create_dish).get(catalog::list_dishes))
        .route("/menus/:id", axum::routing::put(catalog::update_dish).delete(catalog::delete_dish))
        .route("/parking_slots", post(catalog::create_slot).get(catalog::list_slots))
        .route("/parking_slots/:id", axum::routing::put(catalog::update_slot).delete(catalog::delete_slot));

    let restaurants = Router::new()
        .route("/restaurants", post(restaurants::create).get(restaurants::list))
        .route(
            "/restaurants/:id",
            get(restaurants::get).put(restaurants::update).delete(restaurants::delete),
        )
        .route("/restaurants/:id/menu", get(restaurants::menu));

    let accounts = Router::new()
        .route("/admin", post(accounts::create_admin).get(accounts::list_admins))
        .route(
            "/admin/:id",
            get(accounts::get_admin).put(accounts::update_admin).delete(accounts::delete_admin),
        )
        .route("/users", post(accounts::signup).get(accounts::lookup_users))
        .route(
            "/users/:id",
            get(accounts::get_user).put(accounts::update_user).delete(accounts::delete_user),
        );

    ops.merge(auth_routes)
        .merge(bookings)
        .merge(orders)
        .merge(catalog)
        .merge(restaurants)
        .merge(accounts)
        .layer(middleware::from_fn_with_state(state.clone(), auth::resolve_principal))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
