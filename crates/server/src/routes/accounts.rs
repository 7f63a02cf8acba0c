//! `/admin` management and `/users` accounts.
use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use uuid::Uuid;

use common::types::Message;
use models::admin;
use service::accounts::admin::{self as admins, AdminInput};
use service::accounts::user::{self as users, SignupInput, UpdateUserInput, UserLookup, UserQuery};

use crate::errors::JsonApiError;
use crate::extract::{AdminPrincipal, AnyPrincipal, ApiJson, ApiPath, ApiQuery, StaffPrincipal};
use crate::routes::auth::ServerState;

#[utoipa::path(post, path = "/admin", tag = "admin",
    responses((status = 201, description = "Admin created"), (status = 403, description = "Admins only"), (status = 409, description = "Email taken")))]
pub async fn create_admin(
    State(state): State<ServerState>,
    _admin: AdminPrincipal,
    ApiJson(input): ApiJson<AdminInput>,
) -> Result<(StatusCode, Json<admin::Model>), JsonApiError> {
    let created = admins::create_admin(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(get, path = "/admin", tag = "admin", responses((status = 200, description = "Admins")))]
pub async fn list_admins(State(state): State<ServerState>, _admin: AdminPrincipal) -> Result<Json<Vec<admin::Model>>, JsonApiError> {
    Ok(Json(admins::list_admins(&state.db).await?))
}

#[utoipa::path(get, path = "/admin/{id}", tag = "admin",
    params(("id" = Uuid, Path, description = "Admin id")),
    responses((status = 200, description = "Admin"), (status = 404, description = "Admin not found")))]
pub async fn get_admin(
    State(state): State<ServerState>,
    _admin: AdminPrincipal,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<admin::Model>, JsonApiError> {
    Ok(Json(admins::get_admin(&state.db, id).await?))
}

#[utoipa::path(put, path = "/admin/{id}", tag = "admin",
    params(("id" = Uuid, Path, description = "Admin id")),
    responses((status = 200, description = "Admin updated"), (status = 409, description = "Email taken")))]
pub async fn update_admin(
    State(state): State<ServerState>,
    _admin: AdminPrincipal,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(input): ApiJson<AdminInput>,
) -> Result<Json<admin::Model>, JsonApiError> {
    Ok(Json(admins::update_admin(&state.db, id, input).await?))
}

#[utoipa::path(delete, path = "/admin/{id}", tag = "admin",
    params(("id" = Uuid, Path, description = "Admin id")),
    responses((status = 200, description = "Admin deleted"), (status = 404, description = "Admin not found")))]
pub async fn delete_admin(
    State(state): State<ServerState>,
    _admin: AdminPrincipal,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Message>, JsonApiError> {
    admins::delete_admin(&state.db, id).await?;
    Ok(Json(Message::new("Admin deleted successfully")))
}

#[utoipa::path(post, path = "/users", tag = "users",
    responses((status = 201, description = "User signed up"), (status = 400, description = "Validation error"), (status = 409, description = "Email taken")))]
pub async fn signup(
    State(state): State<ServerState>,
    ApiJson(input): ApiJson<SignupInput>,
) -> Result<(StatusCode, Json<Value>), JsonApiError> {
    let user = users::signup(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(json!({ "user": user, "status": "success" }))))
}

#[utoipa::path(get, path = "/users", tag = "users",
    responses((status = 200, description = "`{users}` or `{user}` when filtered by id or email"), (status = 404, description = "User not found")))]
pub async fn lookup_users(
    State(state): State<ServerState>,
    _staff: StaffPrincipal,
    ApiQuery(q): ApiQuery<UserQuery>,
) -> Result<Json<UserLookup>, JsonApiError> {
    Ok(Json(users::lookup_users(&state.db, q).await?))
}

#[utoipa::path(get, path = "/users/{id}", tag = "users",
    params(("id" = Uuid, Path, description = "User id")),
    responses((status = 200, description = "User"), (status = 403, description = "Another user's account"), (status = 404, description = "User not found")))]
pub async fn get_user(
    State(state): State<ServerState>,
    caller: AnyPrincipal,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Value>, JsonApiError> {
    caller.ensure_self_or_staff(id)?;
    let user = users::get_user(&state.db, id).await?;
    Ok(Json(json!({ "user": user })))
}

#[utoipa::path(put, path = "/users/{id}", tag = "users",
    params(("id" = Uuid, Path, description = "User id")),
    responses((status = 200, description = "User updated"), (status = 400, description = "No field given")))]
pub async fn update_user(
    State(state): State<ServerState>,
    caller: AnyPrincipal,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(input): ApiJson<UpdateUserInput>,
) -> Result<Json<Value>, JsonApiError> {
    caller.ensure_self_or_staff(id)?;
    let user = users::update_user(&state.db, id, input).await?;
    Ok(Json(json!({ "user": user })))
}

#[utoipa::path(delete, path = "/users/{id}", tag = "users",
    params(("id" = Uuid, Path, description = "User id")),
    responses((status = 200, description = "User deleted"), (status = 409, description = "User has orders")))]
pub async fn delete_user(
    State(state): State<ServerState>,
    caller: AnyPrincipal,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Message>, JsonApiError> {
    caller.ensure_self_or_staff(id)?;
    users::delete_user(&state.db, id).await?;
    Ok(Json(Message::new("User deleted successfully")))
}
