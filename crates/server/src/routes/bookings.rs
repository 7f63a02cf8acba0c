use axum::{extract::State, http::StatusCode, Json};
use uuid::Uuid;

use common::pagination::Page;
use common::types::Message;
use service::booking::{
    self,
    domain::{BookingQuery, BookingView, CreateBookingInput, UpdateBookingInput},
};

use crate::errors::JsonApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery, StaffPrincipal};
use crate::routes::auth::ServerState;

#[utoipa::path(post, path = "/bookings", tag = "bookings",
    responses((status = 201, description = "Booking created, table reserved"), (status = 400, description = "Validation error"),
        (status = 404, description = "Restaurant or table not found"), (status = 409, description = "Table already booked")))]
pub async fn create(
    State(state): State<ServerState>,
    ApiJson(input): ApiJson<CreateBookingInput>,
) -> Result<(StatusCode, Json<BookingView>), JsonApiError> {
    let view = booking::create_booking(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

#[utoipa::path(get, path = "/bookings", tag = "bookings",
    responses((status = 200, description = "Paginated bookings"), (status = 401, description = "Unauthorized")))]
pub async fn list(
    State(state): State<ServerState>,
    _staff: StaffPrincipal,
    ApiQuery(q): ApiQuery<BookingQuery>,
) -> Result<Json<Page<BookingView>>, JsonApiError> {
    Ok(Json(booking::list_bookings(&state.db, q).await?))
}

#[utoipa::path(get, path = "/bookings/{id}", tag = "bookings",
    params(("id" = Uuid, Path, description = "Booking id")),
    responses((status = 200, description = "Booking"), (status = 404, description = "Booking not found")))]
pub async fn get(State(state): State<ServerState>, ApiPath(id): ApiPath<Uuid>) -> Result<Json<BookingView>, JsonApiError> {
    Ok(Json(booking::get_booking(&state.db, id).await?))
}

#[utoipa::path(put, path = "/bookings/{id}", tag = "bookings",
    params(("id" = Uuid, Path, description = "Booking id")),
    responses((status = 200, description = "Booking updated"), (status = 404, description = "Not found"), (status = 409, description = "Table already booked")))]
pub async fn update(
    State(state): State<ServerState>,
    _staff: StaffPrincipal,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(input): ApiJson<UpdateBookingInput>,
) -> Result<Json<BookingView>, JsonApiError> {
    Ok(Json(booking::update_booking(&state.db, id, input).await?))
}

#[utoipa::path(delete, path = "/bookings/{id}", tag = "bookings",
    params(("id" = Uuid, Path, description = "Booking id")),
    responses((status = 200, description = "Booking deleted, table released"), (status = 404, description = "Not found")))]
pub async fn delete(
    State(state): State<ServerState>,
    _staff: StaffPrincipal,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Message>, JsonApiError> {
    booking::delete_booking(&state.db, id).await?;
    Ok(Json(Message::new("Booking deleted successfully")))
}
