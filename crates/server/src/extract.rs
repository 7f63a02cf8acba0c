//! Request extractors whose rejections render as [`JsonApiError`].
use axum::async_trait;
use axum::extract::{FromRequest, FromRequestParts};
use axum::http::request::Parts;
use uuid::Uuid;

use service::auth::{Principal, Role};

use crate::errors::JsonApiError;

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(JsonApiError))]
pub struct ApiJson<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(JsonApiError))]
pub struct ApiQuery<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(JsonApiError))]
pub struct ApiPath<T>(pub T);

fn principal(parts: &Parts) -> Result<Principal, JsonApiError> {
    parts
        .extensions
        .get::<Principal>()
        .cloned()
        .ok_or_else(|| JsonApiError::unauthorized("Authentication required"))
}

/// Any authenticated caller.
pub struct AnyPrincipal(pub Principal);

/// Admin or restaurant.
pub struct StaffPrincipal(pub Principal);

pub struct AdminPrincipal(pub Principal);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for AnyPrincipal {
    type Rejection = JsonApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        principal(parts).map(AnyPrincipal)
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for StaffPrincipal {
    type Rejection = JsonApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let p = principal(parts)?;
        if !p.role.is_staff() {
            return Err(JsonApiError::forbidden("Insufficient permissions"));
        }
        Ok(StaffPrincipal(p))
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for AdminPrincipal {
    type Rejection = JsonApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let p = principal(parts)?;
        if p.role != Role::Admin {
            return Err(JsonApiError::forbidden("Insufficient permissions"));
        }
        Ok(AdminPrincipal(p))
    }
}

impl AnyPrincipal {
    /// Users may only act on their own account; staff may act on any.
    pub fn ensure_self_or_staff(&self, id: Uuid) -> Result<(), JsonApiError> {
        if self.0.role == Role::User && self.0.id != id {
            return Err(JsonApiError::forbidden("Insufficient permissions"));
        }
        Ok(())
    }
}

impl StaffPrincipal {
    /// Restaurants may only manage their own account; admins manage all.
    pub fn ensure_owns_restaurant(&self, id: Uuid) -> Result<(), JsonApiError> {
        if self.0.role == Role::Restaurant && self.0.id != id {
            return Err(JsonApiError::forbidden("Insufficient permissions"));
        }
        Ok(())
    }
}
