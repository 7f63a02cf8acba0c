use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use uuid::Uuid;

use common::types::Envelope;
use service::order::{
    self,
    domain::{CreateOrderInput, OrderRef, OrderView, UpdateOrderStatusInput},
};

use crate::errors::JsonApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery, StaffPrincipal};
use crate::routes::auth::ServerState;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct RestaurantFilter {
    pub restaurant_id: Option<Uuid>,
}

#[utoipa::path(post, path = "/orders", tag = "orders",
    responses((status = 201, description = "Order created"), (status = 400, description = "Validation error"),
        (status = 403, description = "Dish belongs to another restaurant"), (status = 404, description = "User, restaurant or dish not found")))]
pub async fn create(
    State(state): State<ServerState>,
    ApiJson(input): ApiJson<CreateOrderInput>,
) -> Result<(StatusCode, Json<Envelope<OrderView>>), JsonApiError> {
    let view = order::create_order(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(Envelope::ok("Order created successfully", view))))
}

#[utoipa::path(get, path = "/orders", tag = "orders", params(RestaurantFilter),
    responses((status = 200, description = "Orders of the restaurant"), (status = 400, description = "restaurantId missing")))]
pub async fn list(
    State(state): State<ServerState>,
    _staff: StaffPrincipal,
    ApiQuery(q): ApiQuery<RestaurantFilter>,
) -> Result<Json<Envelope<Vec<OrderView>>>, JsonApiError> {
    let orders = order::list_orders(&state.db, q.restaurant_id).await?;
    Ok(Json(Envelope::ok("Orders fetched successfully", orders)))
}

#[utoipa::path(get, path = "/orders/{restaurant_id}", tag = "orders",
    params(("restaurant_id" = Uuid, Path, description = "Restaurant id")),
    responses((status = 200, description = "Orders of the restaurant"), (status = 404, description = "Restaurant not found")))]
pub async fn list_for_restaurant(
    State(state): State<ServerState>,
    _staff: StaffPrincipal,
    ApiPath(restaurant_id): ApiPath<Uuid>,
) -> Result<Json<Envelope<Vec<OrderView>>>, JsonApiError> {
    let orders = order::list_orders(&state.db, Some(restaurant_id)).await?;
    Ok(Json(Envelope::ok("Orders fetched successfully", orders)))
}

#[utoipa::path(get, path = "/orders/{id}/detail", tag = "orders",
    params(("id" = Uuid, Path, description = "Order id")),
    responses((status = 200, description = "Order with items"), (status = 404, description = "Order not found")))]
pub async fn detail(
    State(state): State<ServerState>,
    _staff: StaffPrincipal,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<OrderView>, JsonApiError> {
    Ok(Json(order::get_order(&state.db, id).await?))
}

#[utoipa::path(put, path = "/orders/{id}", tag = "orders",
    params(("id" = Uuid, Path, description = "Order id")),
    responses((status = 200, description = "Status changed"), (status = 400, description = "Invalid status"), (status = 404, description = "Order not found")))]
pub async fn update_status(
    State(state): State<ServerState>,
    _staff: StaffPrincipal,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(input): ApiJson<UpdateOrderStatusInput>,
) -> Result<Json<Envelope<OrderRef>>, JsonApiError> {
    let ack = order::update_order_status(&state.db, id, input).await?;
    Ok(Json(Envelope::ok("Order updated successfully", ack)))
}
