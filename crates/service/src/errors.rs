use thiserror::Error;

use models::errors::ModelError;

/// Business error taxonomy; each variant maps to one HTTP status at the edge.
/// Messages are client-facing and returned verbatim.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("upstream error: {0}")]
    Upstream(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("internal error: {0}")]
    Internal(String),
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    pub fn validation(msg: impl Into<String>) -> Self { Self::Validation(msg.into()) }

    pub fn conflict(msg: impl Into<String>) -> Self { Self::Conflict(msg.into()) }

    pub fn forbidden(msg: impl Into<String>) -> Self { Self::Forbidden(msg.into()) }

    /// True for failures caused by the caller's input rather than the server.
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            ServiceError::Db(_) | ServiceError::Internal(_) | ServiceError::Upstream(_) | ServiceError::Model(ModelError::Db(_))
        )
    }
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(e: sea_orm::DbErr) -> Self {
        ServiceError::Db(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_verbatim() {
        assert_eq!(ServiceError::not_found("Restaurant").to_string(), "Restaurant not found");
        assert_eq!(
            ServiceError::validation("Price must be a positive number").to_string(),
            "Price must be a positive number"
        );
        let model: ServiceError = ModelError::Validation("Invalid email format".into()).into();
        assert_eq!(model.to_string(), "Invalid email format");
    }

    #[test]
    fn db_errors_are_not_client_errors() {
        assert!(!ServiceError::Db("boom".into()).is_client_error());
        assert!(ServiceError::conflict("taken").is_client_error());
    }
}
