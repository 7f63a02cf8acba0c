use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use uuid::Uuid;

use common::types::Message;
use models::restaurant;
use service::catalog::restaurant::{self as restaurants, CreateRestaurantInput, RestaurantMenu, UpdateRestaurantInput};

use crate::errors::JsonApiError;
use crate::extract::{ApiJson, ApiPath, StaffPrincipal};
use crate::routes::auth::ServerState;

#[utoipa::path(post, path = "/restaurants", tag = "restaurants",
    responses((status = 201, description = "Restaurant registered (DE_ACTIVE)"), (status = 400, description = "Validation error"), (status = 409, description = "Email taken")))]
pub async fn create(
    State(state): State<ServerState>,
    ApiJson(input): ApiJson<CreateRestaurantInput>,
) -> Result<(StatusCode, Json<Value>), JsonApiError> {
    let created = restaurants::create_restaurant(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(json!({ "restaurant": created }))))
}

#[utoipa::path(get, path = "/restaurants", tag = "restaurants", responses((status = 200, description = "All restaurants")))]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<restaurant::Model>>, JsonApiError> {
    Ok(Json(restaurants::list_restaurants(&state.db).await?))
}

#[utoipa::path(get, path = "/restaurants/{id}", tag = "restaurants",
    params(("id" = Uuid, Path, description = "Restaurant id")),
    responses((status = 200, description = "Restaurant"), (status = 404, description = "Restaurant not found")))]
pub async fn get(State(state): State<ServerState>, ApiPath(id): ApiPath<Uuid>) -> Result<Json<restaurant::Model>, JsonApiError> {
    Ok(Json(restaurants::get_restaurant(&state.db, id).await?))
}

#[utoipa::path(get, path = "/restaurants/{id}/menu", tag = "restaurants",
    params(("id" = Uuid, Path, description = "Restaurant id")),
    responses((status = 200, description = "Restaurant with tables, categories and dishes"), (status = 404, description = "Restaurant not found")))]
pub async fn menu(State(state): State<ServerState>, ApiPath(id): ApiPath<Uuid>) -> Result<Json<RestaurantMenu>, JsonApiError> {
    Ok(Json(restaurants::get_menu(&state.db, id).await?))
}

#[utoipa::path(put, path = "/restaurants/{id}", tag = "restaurants",
    params(("id" = Uuid, Path, description = "Restaurant id")),
    responses((status = 200, description = "Restaurant updated"), (status = 409, description = "Email taken"), (status = 502, description = "Image upload failed")))]
pub async fn update(
    State(state): State<ServerState>,
    staff: StaffPrincipal,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(input): ApiJson<UpdateRestaurantInput>,
) -> Result<Json<restaurant::Model>, JsonApiError> {
    staff.ensure_owns_restaurant(id)?;
    Ok(Json(restaurants::update_restaurant(&state.db, state.images.as_ref(), id, input).await?))
}

#[utoipa::path(delete, path = "/restaurants/{id}", tag = "restaurants",
    params(("id" = Uuid, Path, description = "Restaurant id")),
    responses((status = 200, description = "Restaurant deleted"), (status = 409, description = "Bookings or orders exist")))]
pub async fn delete(
    State(state): State<ServerState>,
    staff: StaffPrincipal,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Message>, JsonApiError> {
    staff.ensure_owns_restaurant(id)?;
    restaurants::delete_restaurant(&state.db, id).await?;
    Ok(Json(Message::new("Restaurant deleted successfully")))
}
