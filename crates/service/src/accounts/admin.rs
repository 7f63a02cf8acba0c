use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use models::validate::is_valid_email;
use models::{admin, AdminRole};

use crate::auth::password::hash_password;
use crate::errors::ServiceError;
use crate::util::{any_present, non_empty};

/// Create body; all fields optional on update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

async fn by_email(db: &DatabaseConnection, email: &str) -> Result<Option<admin::Model>, ServiceError> {
    Ok(admin::Entity::find().filter(admin::Column::Email.eq(email)).one(db).await?)
}

#[instrument(skip(db, input), fields(email = ?input.email))]
pub async fn create_admin(db: &DatabaseConnection, input: AdminInput) -> Result<admin::Model, ServiceError> {
    let (Some(name), Some(email), Some(password)) = (non_empty(input.name), non_empty(input.email), non_empty(input.password)) else {
        return Err(ServiceError::validation("name, email, and password are required"));
    };
    let role = match non_empty(input.role) {
        Some(r) => r.parse::<AdminRole>()?,
        None => AdminRole::Admin,
    };
    if !is_valid_email(&email) {
        return Err(ServiceError::validation("Invalid email format"));
    }
    if by_email(db, &email).await?.is_some() {
        return Err(ServiceError::conflict("Admin with this email already exists"));
    }

    let now = Utc::now();
    let created = admin::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        email: Set(email),
        password_hash: Set(hash_password(&password)?),
        role: Set(role),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await?;
    info!(admin_id = %created.id, role = ?created.role, "admin_created");
    Ok(created)
}

pub async fn list_admins(db: &DatabaseConnection) -> Result<Vec<admin::Model>, ServiceError> {
    Ok(admin::Entity::find().order_by_asc(admin::Column::CreatedAt).all(db).await?)
}

pub async fn get_admin(db: &DatabaseConnection, id: Uuid) -> Result<admin::Model, ServiceError> {
    admin::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Admin"))
}

#[instrument(skip(db, input), fields(admin_id = %id))]
pub async fn update_admin(db: &DatabaseConnection, id: Uuid, input: AdminInput) -> Result<admin::Model, ServiceError> {
    let existing = get_admin(db, id).await?;
    let (name, email, password, role) =
        (non_empty(input.name), non_empty(input.email), non_empty(input.password), non_empty(input.role));
    if !any_present(&[name.is_some(), email.is_some(), password.is_some(), role.is_some()]) {
        return Err(ServiceError::validation("At least one field must be provided for update"));
    }
    let role = role.map(|r| r.parse::<AdminRole>()).transpose()?;

    let mut am: admin::ActiveModel = existing.into();
    if let Some(email) = email {
        if !is_valid_email(&email) {
            return Err(ServiceError::validation("Invalid email format"));
        }
        if by_email(db, &email).await?.is_some_and(|a| a.id != id) {
            return Err(ServiceError::conflict("Email is already in use"));
        }
        am.email = Set(email);
    }
    if let Some(v) = name {
        am.name = Set(v);
    }
    if let Some(v) = password {
        am.password_hash = Set(hash_password(&v)?);
    }
    if let Some(v) = role {
        am.role = Set(v);
    }
    am.updated_at = Set(Utc::now());
    Ok(am.update(db).await?)
}

#[instrument(skip(db), fields(admin_id = %id))]
pub async fn delete_admin(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    get_admin(db, id).await?;
    admin::Entity::delete_by_id(id).exec(db).await?;
    info!("admin_deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    fn input(email: &str, role: Option<&str>) -> AdminInput {
        AdminInput {
            name: Some("Root".into()),
            email: Some(email.into()),
            password: Some("admin-pass".into()),
            role: role.map(Into::into),
        }
    }

    #[tokio::test]
    async fn create_defaults_role_and_rejects_unknown() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let a = create_admin(&db, input("root@dinehub.pk", None)).await?;
        assert_eq!(a.role, AdminRole::Admin);

        let err = create_admin(&db, input("ops@dinehub.pk", Some("OWNER"))).await.unwrap_err();
        assert_eq!(err.to_string(), "role must be one of ADMIN, SUPER_ADMIN");

        let dup = create_admin(&db, input("root@dinehub.pk", Some("SUPER_ADMIN"))).await;
        assert!(matches!(dup, Err(ServiceError::Conflict(_))));
        assert_eq!(list_admins(&db).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn update_and_delete() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let a = create_admin(&db, input("root@dinehub.pk", None)).await?;
        let b = create_admin(&db, input("ops@dinehub.pk", None)).await?;

        let taken = AdminInput { email: Some("ops@dinehub.pk".into()), ..Default::default() };
        assert_eq!(update_admin(&db, a.id, taken).await.unwrap_err().to_string(), "Email is already in use");
        assert!(matches!(update_admin(&db, a.id, AdminInput::default()).await, Err(ServiceError::Validation(_))));

        let promoted = update_admin(&db, a.id, AdminInput { role: Some("SUPER_ADMIN".into()), ..Default::default() }).await?;
        assert_eq!(promoted.role, AdminRole::SuperAdmin);

        delete_admin(&db, b.id).await?;
        assert_eq!(get_admin(&db, b.id).await.unwrap_err().to_string(), "Admin not found");
        Ok(())
    }
}
