//! HS256 bearer tokens.
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use super::domain::{Claims, Principal};
use super::errors::AuthError;

/// Token signing configuration
#[derive(Clone, Debug)]
pub struct TokenConfig {
    pub jwt_secret: String,
    pub ttl_secs: u64,
}

impl From<&configs::AuthConfig> for TokenConfig {
    fn from(cfg: &configs::AuthConfig) -> Self {
        Self { jwt_secret: cfg.jwt_secret.clone(), ttl_secs: cfg.token_ttl_secs }
    }
}

pub fn issue_token(cfg: &TokenConfig, principal: &Principal) -> Result<String, AuthError> {
    let now = Utc::now();
    let ttl = i64::try_from(cfg.ttl_secs).map_err(|e| AuthError::TokenError(e.to_string()))?;
    let claims = Claims {
        sub: principal.id.to_string(),
        email: principal.email.clone(),
        role: principal.role,
        iat: now.timestamp() as usize,
        exp: (now + Duration::seconds(ttl)).timestamp() as usize,
    };
    encode(&Header::new(Algorithm::HS256), &claims, &EncodingKey::from_secret(cfg.jwt_secret.as_bytes()))
        .map_err(|e| AuthError::TokenError(e.to_string()))
}

/// Any decoding failure (bad signature, expiry, malformed subject) is `InvalidToken`.
pub fn verify_token(cfg: &TokenConfig, token: &str) -> Result<Principal, AuthError> {
    let key = DecodingKey::from_secret(cfg.jwt_secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    validation.leeway = 0;

    let data = decode::<Claims>(token, &key, &validation).map_err(|e| {
        tracing::debug!(err = %e, "token_rejected");
        AuthError::InvalidToken
    })?;
    let id = Uuid::parse_str(&data.claims.sub).map_err(|_| AuthError::InvalidToken)?;
    Ok(Principal { id, email: data.claims.email, role: data.claims.role })
}
