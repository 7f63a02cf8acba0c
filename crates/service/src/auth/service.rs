use std::sync::Arc;

use tracing::{info, instrument, warn};

use super::domain::{AuthSession, LoginInput, Principal, Role};
use super::errors::AuthError;
use super::password::verify_password;
use super::repository::AuthRepository;
use super::token::{issue_token, verify_token, TokenConfig};
use models::validate::is_valid_email;

/// Auth business service independent of web framework
pub struct AuthService<R: AuthRepository> {
    repo: Arc<R>,
    cfg: TokenConfig,
}

impl<R: AuthRepository> AuthService<R> {
    pub fn new(repo: Arc<R>, cfg: TokenConfig) -> Self { Self { repo, cfg } }

    /// Verify email + password for an account of `role` and issue a bearer token.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthService, Role, domain::LoginInput, repository::mock::MockAuthRepository, token::TokenConfig};
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// repo.insert(Role::Admin, "ops@dinehub.io", "Passw0rd!").unwrap();
    /// let svc = AuthService::new(repo, TokenConfig { jwt_secret: "secret".into(), ttl_secs: 3600 });
    /// let input = LoginInput { email: Some("ops@dinehub.io".into()), password: Some("Passw0rd!".into()) };
    /// let session = tokio_test::block_on(svc.login(Role::Admin, input)).unwrap();
    /// assert_eq!(session.principal.role, Role::Admin);
    /// assert!(!session.token.is_empty());
    /// ```
    #[instrument(skip_all, fields(role = role.as_str()))]
    pub async fn login(&self, role: Role, input: LoginInput) -> Result<AuthSession, AuthError> {
        let (email, password) = match (input.email, input.password) {
            (Some(e), Some(p)) if !e.trim().is_empty() && !p.is_empty() => (e.trim().to_string(), p),
            _ => return Err(AuthError::Validation("Email and password are required".into())),
        };
        if !is_valid_email(&email) {
            return Err(AuthError::Validation("Invalid email format".into()));
        }

        let Some(account) = self.repo.find_account(role, &email).await? else {
            warn!(email = %email, "login_unknown_account");
            return Err(AuthError::InvalidCredentials);
        };
        if !verify_password(&password, &account.password_hash)? {
            warn!(email = %email, "login_bad_password");
            return Err(AuthError::InvalidCredentials);
        }

        let principal = Principal { id: account.id, email: account.email, role };
        let token = issue_token(&self.cfg, &principal)?;
        info!(id = %principal.id, email = %principal.email, role = role.as_str(), "login_succeeded");
        Ok(AuthSession { principal, token })
    }

    /// Resolve a bearer token back into its principal.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthService, Principal, Role, repository::mock::MockAuthRepository, token::TokenConfig};
    /// use std::sync::Arc;
    /// let svc = AuthService::new(Arc::new(MockAuthRepository::default()), TokenConfig { jwt_secret: "secret".into(), ttl_secs: 60 });
    /// let p = Principal { id: uuid::Uuid::new_v4(), email: "u@e.com".into(), role: Role::User };
    /// let token = svc.issue_token(&p).unwrap();
    /// assert_eq!(svc.verify_token(&token).unwrap(), p);
    /// assert!(svc.verify_token("garbage").is_err());
    /// ```
    pub fn verify_token(&self, token: &str) -> Result<Principal, AuthError> {
        verify_token(&self.cfg, token)
    }

    pub fn issue_token(&self, principal: &Principal) -> Result<String, AuthError> {
        issue_token(&self.cfg, principal)
    }
}
