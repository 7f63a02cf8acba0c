use async_trait::async_trait;

use super::domain::{Account, Role};
use super::errors::AuthError;

/// Repository abstraction for credential lookups.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn find_account(&self, role: Role, email: &str) -> Result<Option<Account>, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use crate::auth::password::hash_password;

    #[derive(Default)]
    pub struct MockAuthRepository {
        accounts: Mutex<HashMap<(Role, String), Account>>, // key: (role, email)
    }

    impl MockAuthRepository {
        /// Register an account with a freshly hashed password.
        pub fn insert(&self, role: Role, email: &str, password: &str) -> Result<Account, AuthError> {
            let account = Account {
                id: uuid::Uuid::new_v4(),
                email: email.to_string(),
                password_hash: hash_password(password)?,
            };
            let mut accounts = self.accounts.lock().map_err(|e| AuthError::Repository(e.to_string()))?;
            accounts.insert((role, email.to_string()), account.clone());
            Ok(account)
        }
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn find_account(&self, role: Role, email: &str) -> Result<Option<Account>, AuthError> {
            let accounts = self.accounts.lock().map_err(|e| AuthError::Repository(e.to_string()))?;
            Ok(accounts.get(&(role, email.to_string())).cloned())
        }
    }
}
