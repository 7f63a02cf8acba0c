//! Tables, categories, dishes (`/menus`) and parking slots.
use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use uuid::Uuid;

use common::types::Envelope;
use models::{category as category_entity, dining_table, parking_slot as slot_entity};
use service::catalog::dish::{DishInput, DishView};
use service::catalog::{category, dish, parking_slot, table};

use crate::errors::JsonApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery, StaffPrincipal};
use crate::routes::auth::ServerState;
use crate::routes::orders::RestaurantFilter;

type Enveloped<T> = Result<Json<Envelope<T>>, JsonApiError>;
type Created<T> = Result<(StatusCode, Json<T>), JsonApiError>;

fn deleted(message: &str) -> Json<Envelope<Value>> {
    Json(Envelope::ok(message, json!({})))
}

// tables

#[utoipa::path(post, path = "/tables", tag = "tables",
    responses((status = 201, description = "Table created"), (status = 400, description = "Validation error"), (status = 409, description = "Duplicate table number")))]
pub async fn create_table(
    State(state): State<ServerState>,
    _staff: StaffPrincipal,
    ApiJson(input): ApiJson<table::CreateTableInput>,
) -> Created<dining_table::Model> {
    let created = table::create_table(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(get, path = "/tables", tag = "tables", params(RestaurantFilter),
    responses((status = 200, description = "Tables")))]
pub async fn list_tables(State(state): State<ServerState>, ApiQuery(q): ApiQuery<RestaurantFilter>) -> Enveloped<Vec<dining_table::Model>> {
    let tables = table::list_tables(&state.db, q.restaurant_id).await?;
    Ok(Json(Envelope::ok("Tables fetched successfully", tables)))
}

#[utoipa::path(get, path = "/tables/{id}", tag = "tables",
    params(("id" = Uuid, Path, description = "Table id")),
    responses((status = 200, description = "Table"), (status = 404, description = "Table not found")))]
pub async fn get_table(State(state): State<ServerState>, ApiPath(id): ApiPath<Uuid>) -> Result<Json<dining_table::Model>, JsonApiError> {
    Ok(Json(table::get_table(&state.db, id).await?))
}

#[utoipa::path(put, path = "/tables/{id}", tag = "tables",
    params(("id" = Uuid, Path, description = "Table id")),
    responses((status = 200, description = "Table updated"), (status = 403, description = "Table of another restaurant"), (status = 404, description = "Not found")))]
pub async fn update_table(
    State(state): State<ServerState>,
    _staff: StaffPrincipal,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(input): ApiJson<table::UpdateTableInput>,
) -> Enveloped<dining_table::Model> {
    let updated = table::update_table(&state.db, id, input).await?;
    Ok(Json(Envelope::ok("Table updated successfully", updated)))
}

#[utoipa::path(delete, path = "/tables/{id}", tag = "tables",
    params(("id" = Uuid, Path, description = "Table id")),
    responses((status = 200, description = "Table deleted"), (status = 409, description = "Table has bookings")))]
pub async fn delete_table(State(state): State<ServerState>, _staff: StaffPrincipal, ApiPath(id): ApiPath<Uuid>) -> Enveloped<Value> {
    table::delete_table(&state.db, id).await?;
    Ok(deleted("Table deleted successfully"))
}

// categories

#[utoipa::path(post, path = "/categories", tag = "categories",
    responses((status = 201, description = "Category created"), (status = 409, description = "Duplicate name")))]
pub async fn create_category(
    State(state): State<ServerState>,
    _staff: StaffPrincipal,
    ApiJson(input): ApiJson<category::CategoryInput>,
) -> Created<Envelope<category_entity::Model>> {
    let created = category::create_category(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(Envelope::ok("Category created successfully", created))))
}

#[utoipa::path(get, path = "/categories", tag = "categories", params(RestaurantFilter),
    responses((status = 200, description = "Categories"), (status = 400, description = "restaurantId missing")))]
pub async fn list_categories(State(state): State<ServerState>, ApiQuery(q): ApiQuery<RestaurantFilter>) -> Enveloped<Vec<category_entity::Model>> {
    let categories = category::list_categories(&state.db, q.restaurant_id).await?;
    Ok(Json(Envelope::ok("Categories fetched successfully", categories)))
}

#[utoipa::path(put, path = "/categories/{id}", tag = "categories",
    params(("id" = Uuid, Path, description = "Category id")),
    responses((status = 200, description = "Category updated"), (status = 403, description = "Category of another restaurant")))]
pub async fn update_category(
    State(state): State<ServerState>,
    _staff: StaffPrincipal,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(input): ApiJson<category::CategoryInput>,
) -> Enveloped<category_entity::Model> {
    let updated = category::update_category(&state.db, id, input).await?;
    Ok(Json(Envelope::ok("Category updated successfully", updated)))
}

#[utoipa::path(delete, path = "/categories/{id}", tag = "categories",
    params(("id" = Uuid, Path, description = "Category id")),
    responses((status = 200, description = "Category deleted"), (status = 409, description = "Category has dishes")))]
pub async fn delete_category(State(state): State<ServerState>, _staff: StaffPrincipal, ApiPath(id): ApiPath<Uuid>) -> Enveloped<Value> {
    category::delete_category(&state.db, id).await?;
    Ok(deleted("Category deleted successfully"))
}

// dishes

#[utoipa::path(post, path = "/menus", tag = "menus",
    responses((status = 201, description = "Dish created"), (status = 400, description = "Validation error"), (status = 409, description = "Duplicate name")))]
pub async fn create_dish(
    State(state): State<ServerState>,
    _staff: StaffPrincipal,
    ApiJson(input): ApiJson<DishInput>,
) -> Created<Envelope<DishView>> {
    let created = dish::create_dish(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(Envelope::ok("Dish created successfully", created))))
}

#[utoipa::path(get, path = "/menus", tag = "menus", params(RestaurantFilter),
    responses((status = 200, description = "Dishes of the restaurant")))]
pub async fn list_dishes(State(state): State<ServerState>, ApiQuery(q): ApiQuery<RestaurantFilter>) -> Enveloped<Vec<DishView>> {
    let dishes = dish::list_dishes(&state.db, q.restaurant_id).await?;
    Ok(Json(Envelope::ok("Dishes fetched successfully", dishes)))
}

#[utoipa::path(put, path = "/menus/{id}", tag = "menus",
    params(("id" = Uuid, Path, description = "Dish id")),
    responses((status = 200, description = "Dish updated"), (status = 403, description = "Category of another restaurant")))]
pub async fn update_dish(
    State(state): State<ServerState>,
    _staff: StaffPrincipal,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(input): ApiJson<DishInput>,
) -> Enveloped<DishView> {
    let updated = dish::update_dish(&state.db, id, input).await?;
    Ok(Json(Envelope::ok("Dish updated successfully", updated)))
}

#[utoipa::path(delete, path = "/menus/{id}", tag = "menus",
    params(("id" = Uuid, Path, description = "Dish id")),
    responses((status = 200, description = "Dish deleted"), (status = 409, description = "Dish has order items")))]
pub async fn delete_dish(State(state): State<ServerState>, _staff: StaffPrincipal, ApiPath(id): ApiPath<Uuid>) -> Enveloped<Value> {
    dish::delete_dish(&state.db, id).await?;
    Ok(deleted("Dish deleted successfully"))
}

// parking slots

#[utoipa::path(post, path = "/parking_slots", tag = "parking",
    responses((status = 201, description = "Parking slot created"), (status = 409, description = "Duplicate slot number")))]
pub async fn create_slot(
    State(state): State<ServerState>,
    _staff: StaffPrincipal,
    ApiJson(input): ApiJson<parking_slot::ParkingSlotInput>,
) -> Created<Envelope<slot_entity::Model>> {
    let created = parking_slot::create_parking_slot(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(Envelope::ok("Parking slot created successfully", created))))
}

#[utoipa::path(get, path = "/parking_slots", tag = "parking", params(RestaurantFilter),
    responses((status = 200, description = "Parking slots")))]
pub async fn list_slots(State(state): State<ServerState>, ApiQuery(q): ApiQuery<RestaurantFilter>) -> Enveloped<Vec<slot_entity::Model>> {
    let slots = parking_slot::list_parking_slots(&state.db, q.restaurant_id).await?;
    Ok(Json(Envelope::ok("Parking slots fetched successfully", slots)))
}

#[utoipa::path(put, path = "/parking_slots/{id}", tag = "parking",
    params(("id" = Uuid, Path, description = "Parking slot id")),
    responses((status = 200, description = "Parking slot updated"), (status = 403, description = "Slot of another restaurant")))]
pub async fn update_slot(
    State(state): State<ServerState>,
    _staff: StaffPrincipal,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(input): ApiJson<parking_slot::ParkingSlotInput>,
) -> Enveloped<slot_entity::Model> {
    let updated = parking_slot::update_parking_slot(&state.db, id, input).await?;
    Ok(Json(Envelope::ok("Parking slot updated successfully", updated)))
}

#[utoipa::path(delete, path = "/parking_slots/{id}", tag = "parking",
    params(("id" = Uuid, Path, description = "Parking slot id")),
    responses((status = 200, description = "Parking slot deleted"), (status = 404, description = "Not found")))]
pub async fn delete_slot(State(state): State<ServerState>, _staff: StaffPrincipal, ApiPath(id): ApiPath<Uuid>) -> Enveloped<Value> {
    parking_slot::delete_parking_slot(&state.db, id).await?;
    Ok(deleted("Parking slot deleted successfully"))
}
