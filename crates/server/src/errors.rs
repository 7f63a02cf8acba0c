use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use models::errors::ModelError;
use service::auth::errors::AuthError;
use service::errors::ServiceError;

/// Error body sent to clients: `{"error": "...", "detail": "..."}`; `detail` only on 5xx.
#[derive(Debug, Serialize)]
pub struct JsonApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: impl Into<String>, detail: Option<String>) -> Self {
        Self { status, error: error.into(), detail }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self { Self::new(StatusCode::BAD_REQUEST, msg, None) }

    pub fn unauthorized(msg: impl Into<String>) -> Self { Self::new(StatusCode::UNAUTHORIZED, msg, None) }

    pub fn forbidden(msg: impl Into<String>) -> Self { Self::new(StatusCode::FORBIDDEN, msg, None) }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, error = %self.error, detail = ?self.detail, "request failed");
        }
        (self.status, Json(self)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        let status = match &e {
            ServiceError::Validation(_) | ServiceError::Model(ModelError::Validation(_)) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ServiceError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ServiceError::Db(_) | ServiceError::Internal(_) | ServiceError::Model(ModelError::Db(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        if !e.is_client_error() {
            Self::new(status, "Internal server error", Some(e.to_string()))
        } else {
            Self::new(status, e.to_string(), None)
        }
    }
}

impl From<AuthError> for JsonApiError {
    fn from(e: AuthError) -> Self { ServiceError::from(e).into() }
}

impl From<JsonRejection> for JsonApiError {
    fn from(r: JsonRejection) -> Self { Self::bad_request(r.body_text()) }
}

impl From<QueryRejection> for JsonApiError {
    fn from(r: QueryRejection) -> Self { Self::bad_request(r.body_text()) }
}

impl From<PathRejection> for JsonApiError {
    fn from(r: PathRejection) -> Self { Self::bad_request(r.body_text()) }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_statuses() {
        let cases = [
            (ServiceError::validation("x"), StatusCode::BAD_REQUEST),
            (ServiceError::not_found("Table"), StatusCode::NOT_FOUND),
            (ServiceError::forbidden("x"), StatusCode::FORBIDDEN),
            (ServiceError::conflict("x"), StatusCode::CONFLICT),
            (ServiceError::Upstream("x".into()), StatusCode::BAD_GATEWAY),
            (ServiceError::Db("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (ModelError::Validation("bad status".into()).into(), StatusCode::BAD_REQUEST),
        ];
        for (err, status) in cases {
            assert_eq!(JsonApiError::from(err).status, status);
        }
    }

    #[test]
    fn internal_details_stay_out_of_error_message() {
        let e = JsonApiError::from(ServiceError::Db("connection reset".into()));
        assert_eq!(e.error, "Internal server error");
        let body = serde_json::to_value(&e).unwrap();
        assert!(body.get("status").is_none());
        assert!(body["detail"].as_str().unwrap().contains("connection reset"));
    }

    #[test]
    fn client_errors_carry_message_verbatim() {
        let e = JsonApiError::from(ServiceError::not_found("Table"));
        let body = serde_json::to_value(&e).unwrap();
        assert_eq!(body, serde_json::json!({"error": "Table not found"}));
    }
}
