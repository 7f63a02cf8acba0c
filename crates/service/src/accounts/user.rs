//! Customer accounts.
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use models::validate::is_valid_email;
use models::{order, user};

use crate::auth::password::hash_password;
use crate::errors::ServiceError;
use crate::util::{any_present, non_empty};

pub const MIN_PASSWORD_LEN: usize = 8;
const MAX_TEXT_LEN: usize = 255;
const MAX_PHONE_LEN: usize = 50;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupInput {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
}

/// Profile update; email and password are not editable here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserInput {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserQuery {
    pub id: Option<Uuid>,
    pub email: Option<String>,
}

/// Serialises as `{"users": [...]}` or `{"user": {...}}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UserLookup {
    Users(Vec<user::Model>),
    User(user::Model),
}

fn check_lengths(fields: &[Option<&str>], phone: Option<&str>) -> Result<(), ServiceError> {
    let too_long = fields.iter().flatten().any(|f| f.chars().count() > MAX_TEXT_LEN)
        || phone.is_some_and(|p| p.chars().count() > MAX_PHONE_LEN);
    if too_long {
        return Err(ServiceError::validation("Input fields exceed maximum length"));
    }
    Ok(())
}

#[instrument(skip(db, input), fields(email = ?input.email))]
pub async fn signup(db: &DatabaseConnection, input: SignupInput) -> Result<user::Model, ServiceError> {
    let (Some(email), Some(password), Some(name), Some(city), Some(address)) = (
        non_empty(input.email),
        input.password.filter(|p| !p.is_empty()),
        non_empty(input.name),
        non_empty(input.city),
        non_empty(input.address),
    ) else {
        return Err(ServiceError::validation("Email, password, name, city, and address are required"));
    };
    if !is_valid_email(&email) {
        return Err(ServiceError::validation("Invalid email format"));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ServiceError::validation("Password must be at least 8 characters long"));
    }
    let phone = non_empty(input.phone);
    check_lengths(&[Some(&name), Some(&city), Some(&address)], phone.as_deref())?;

    let exists = user::Entity::find().filter(user::Column::Email.eq(email.as_str())).one(db).await?;
    if exists.is_some() {
        return Err(ServiceError::conflict("User with this email already exists"));
    }

    let now = Utc::now();
    let created = user::ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(email),
        password_hash: Set(hash_password(&password)?),
        name: Set(name),
        phone: Set(phone),
        city: Set(city),
        address: Set(address),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await?;
    info!(user_id = %created.id, "user_signed_up");
    Ok(created)
}

/// Everyone, or exactly one user by `id` or `email`.
pub async fn lookup_users(db: &DatabaseConnection, query: UserQuery) -> Result<UserLookup, ServiceError> {
    let email = non_empty(query.email);
    let found = match (query.id, email) {
        (Some(_), Some(_)) => return Err(ServiceError::validation("Provide either id or email, not both")),
        (None, None) => {
            let all = user::Entity::find().order_by_asc(user::Column::CreatedAt).all(db).await?;
            return Ok(UserLookup::Users(all));
        }
        (Some(id), None) => user::Entity::find_by_id(id).one(db).await?,
        (None, Some(email)) => user::Entity::find().filter(user::Column::Email.eq(email)).one(db).await?,
    };
    found.map(UserLookup::User).ok_or_else(|| ServiceError::not_found("User"))
}

pub async fn get_user(db: &DatabaseConnection, id: Uuid) -> Result<user::Model, ServiceError> {
    user::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("User"))
}

#[instrument(skip(db, input), fields(user_id = %id))]
pub async fn update_user(db: &DatabaseConnection, id: Uuid, input: UpdateUserInput) -> Result<user::Model, ServiceError> {
    let (name, city, address) = (non_empty(input.name), non_empty(input.city), non_empty(input.address));
    let phone_given = input.phone.as_deref().is_some_and(|p| !p.trim().is_empty());
    if !any_present(&[name.is_some(), phone_given, city.is_some(), address.is_some()]) {
        return Err(ServiceError::validation("At least one field (name, phone, city, address) must be provided"));
    }
    check_lengths(&[name.as_deref(), city.as_deref(), address.as_deref()], input.phone.as_deref())?;

    let existing = get_user(db, id).await?;
    let mut am: user::ActiveModel = existing.into();
    if let Some(v) = name {
        am.name = Set(v);
    }
    // An explicit empty phone clears it.
    if let Some(p) = input.phone {
        am.phone = Set(non_empty(Some(p)));
    }
    if let Some(v) = city {
        am.city = Set(v);
    }
    if let Some(v) = address {
        am.address = Set(v);
    }
    am.updated_at = Set(Utc::now());
    Ok(am.update(db).await?)
}

/// Delete a user. Bookings survive with their user cleared; orders block deletion.
#[instrument(skip(db), fields(user_id = %id))]
pub async fn delete_user(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    get_user(db, id).await?;
    let has_orders = order::Entity::find()
        .filter(order::Column::UserId.eq(id))
        .one(db)
        .await?
        .is_some();
    if has_orders {
        return Err(ServiceError::conflict("Cannot delete user with existing orders"));
    }
    user::Entity::delete_by_id(id).exec(db).await?;
    info!("user_deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    fn input(email: &str, password: &str) -> SignupInput {
        SignupInput {
            email: Some(email.into()),
            password: Some(password.into()),
            name: Some("Hina".into()),
            phone: None,
            city: Some("Karachi".into()),
            address: Some("Clifton".into()),
        }
    }

    #[tokio::test]
    async fn signup_rules() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let short = signup(&db, input("hina@mail.com", "short")).await.unwrap_err();
        assert_eq!(short.to_string(), "Password must be at least 8 characters long");

        let bad = signup(&db, input("not-an-email", "longenough")).await.unwrap_err();
        assert_eq!(bad.to_string(), "Invalid email format");

        let mut long = input("hina@mail.com", "longenough");
        long.phone = Some("9".repeat(51));
        assert_eq!(signup(&db, long).await.unwrap_err().to_string(), "Input fields exceed maximum length");

        let u = signup(&db, input("hina@mail.com", "longenough")).await?;
        assert!(serde_json::to_value(&u)?.get("passwordHash").is_none());
        let dup = signup(&db, input("hina@mail.com", "longenough")).await;
        assert!(matches!(dup, Err(ServiceError::Conflict(_))));
        Ok(())
    }

    #[tokio::test]
    async fn lookup_by_id_or_email() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let u = signup(&db, input("hina@mail.com", "longenough")).await?;
        signup(&db, input("omar@mail.com", "longenough")).await?;

        let both = lookup_users(&db, UserQuery { id: Some(u.id), email: Some("hina@mail.com".into()) }).await;
        assert!(matches!(both, Err(ServiceError::Validation(_))));

        let json = serde_json::to_value(lookup_users(&db, UserQuery::default()).await?)?;
        assert_eq!(json["users"].as_array().map(Vec::len), Some(2));

        let json = serde_json::to_value(lookup_users(&db, UserQuery { email: Some("hina@mail.com".into()), ..Default::default() }).await?)?;
        assert_eq!(json["user"]["id"], u.id.to_string());

        let missing = lookup_users(&db, UserQuery { id: Some(Uuid::new_v4()), ..Default::default() }).await;
        assert!(matches!(missing, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn update_and_delete() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let u = signup(&db, input("hina@mail.com", "longenough")).await?;

        let empty = update_user(&db, u.id, UpdateUserInput::default()).await.unwrap_err();
        assert_eq!(empty.to_string(), "At least one field (name, phone, city, address) must be provided");

        let updated = update_user(&db, u.id, UpdateUserInput { phone: Some("0321-0000000".into()), ..Default::default() }).await?;
        assert_eq!(updated.phone.as_deref(), Some("0321-0000000"));
        assert_eq!(updated.city, "Karachi");

        delete_user(&db, u.id).await?;
        assert_eq!(get_user(&db, u.id).await.unwrap_err().to_string(), "User not found");
        Ok(())
    }
}
