use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
    Json,
};
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use tracing::{info, warn};

use service::accounts::{admin as admins, user as users};
use service::auth::domain::LoginInput;
use service::auth::repo::seaorm::SeaOrmAuthRepository;
use service::auth::token::{verify_token, TokenConfig};
use service::auth::{AuthService, Role};
use service::catalog::restaurant as restaurants;
use service::images::ImageStore;

use crate::errors::JsonApiError;
use crate::extract::ApiJson;

#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub tokens: TokenConfig,
    pub images: Arc<dyn ImageStore>,
}

/// Global middleware: a valid `Authorization: Bearer <token>` attaches a
/// [`service::auth::Principal`] to the request. No header means anonymous;
/// a malformed, forged or expired token is rejected with 401.
pub async fn resolve_principal(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    if let Some(value) = req.headers().get(AUTHORIZATION) {
        let path = req.uri().path().to_string();
        let token = value
            .to_str()
            .ok()
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                warn!(%path, "invalid Authorization format (expect Bearer)");
                JsonApiError::unauthorized("Invalid or expired token")
            })?;
        let principal = verify_token(&state.tokens, token).map_err(|e| {
            warn!(%path, err = %e, "token validation failed");
            JsonApiError::from(e)
        })?;
        req.extensions_mut().insert(principal);
    }
    Ok(next.run(req).await)
}

async fn login(state: &ServerState, role: Role, input: LoginInput) -> Result<(uuid::Uuid, String), JsonApiError> {
    let repo = Arc::new(SeaOrmAuthRepository { db: state.db.clone() });
    let svc = AuthService::new(repo, state.tokens.clone());
    let session = svc.login(role, input).await?;
    info!(role = role.as_str(), id = %session.principal.id, "login_succeeded");
    Ok((session.principal.id, session.token))
}

#[utoipa::path(post, path = "/admin/login", tag = "auth",
    responses((status = 200, description = "Token issued"), (status = 400, description = "Missing fields"), (status = 401, description = "Invalid email or password")))]
pub async fn admin_login(State(state): State<ServerState>, ApiJson(input): ApiJson<LoginInput>) -> Result<Json<Value>, JsonApiError> {
    let (id, token) = login(&state, Role::Admin, input).await?;
    let admin = admins::get_admin(&state.db, id).await?;
    Ok(Json(json!({ "admin": admin, "token": token })))
}

#[utoipa::path(post, path = "/restaurant/login", tag = "auth",
    responses((status = 200, description = "Token issued"), (status = 400, description = "Missing fields"), (status = 401, description = "Invalid email or password")))]
pub async fn restaurant_login(State(state): State<ServerState>, ApiJson(input): ApiJson<LoginInput>) -> Result<Json<Value>, JsonApiError> {
    let (id, token) = login(&state, Role::Restaurant, input).await?;
    let restaurant = restaurants::get_restaurant(&state.db, id).await?;
    Ok(Json(json!({ "restaurant": restaurant, "token": token })))
}

#[utoipa::path(post, path = "/users/login", tag = "auth",
    responses((status = 200, description = "Token issued"), (status = 400, description = "Missing fields"), (status = 401, description = "Invalid email or password")))]
pub async fn user_login(State(state): State<ServerState>, ApiJson(input): ApiJson<LoginInput>) -> Result<Json<Value>, JsonApiError> {
    let (id, token) = login(&state, Role::User, input).await?;
    let user = users::get_user(&state.db, id).await?;
    Ok(Json(json!({ "user": user, "token": token })))
}
