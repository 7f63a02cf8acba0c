use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::auth::domain::{Account, Role};
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;
use models::{admin, restaurant, user};

pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_account(&self, role: Role, email: &str) -> Result<Option<Account>, AuthError> {
        let repo_err = |e: sea_orm::DbErr| AuthError::Repository(e.to_string());
        let account = match role {
            Role::Admin => admin::Entity::find()
                .filter(admin::Column::Email.eq(email))
                .one(&self.db)
                .await
                .map_err(repo_err)?
                .map(|a| Account { id: a.id, email: a.email, password_hash: a.password_hash }),
            Role::Restaurant => restaurant::Entity::find()
                .filter(restaurant::Column::Email.eq(email))
                .one(&self.db)
                .await
                .map_err(repo_err)?
                .map(|r| Account { id: r.id, email: r.email, password_hash: r.password_hash }),
            Role::User => user::Entity::find()
                .filter(user::Column::Email.eq(email))
                .one(&self.db)
                .await
                .map_err(repo_err)?
                .map(|u| Account { id: u.id, email: u.email, password_hash: u.password_hash }),
        };
        Ok(account)
    }
}
