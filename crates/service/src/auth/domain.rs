use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of account a token was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Restaurant,
    User,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Restaurant => "restaurant",
            Role::User => "user",
        }
    }

    /// Admins and restaurants operate the back-office.
    pub fn is_staff(self) -> bool {
        matches!(self, Role::Admin | Role::Restaurant)
    }
}

/// Verified identity attached to a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
}

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub role: Role,
    pub exp: usize,
    pub iat: usize,
}

/// Login input; fields are optional so that missing ones surface as validation errors
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Stored credentials for one account
#[derive(Debug, Clone)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
}

/// Login result (session)
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub principal: Principal,
    pub token: String,
}
