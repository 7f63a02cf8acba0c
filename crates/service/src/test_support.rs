#![cfg(test)]
//! In-memory SQLite database plus a handful of fixtures shared by service tests.
use chrono::{Duration, Utc};
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
use uuid::Uuid;

use models::{category, dining_table, dish, restaurant, user, RestaurantStatus, TableStatus};

/// Fresh migrated database per test. A single pooled connection keeps the
/// in-memory database alive and shared by every query in the test.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let mut opts = ConnectOptions::new("sqlite::memory:".to_string());
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opts).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

pub async fn restaurant(db: &DatabaseConnection, name: &str) -> Result<restaurant::Model, anyhow::Error> {
    let now = Utc::now();
    let am = restaurant::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        email: Set(format!("{}@{}.pk", Uuid::new_v4().simple(), name.to_lowercase().replace(' ', ""))),
        password_hash: Set(crate::auth::password::hash_password("Passw0rd!")?),
        phone: Set("0300-1234567".into()),
        address: Set("Mall Road".into()),
        city: Set("Lahore".into()),
        cuisine: Set("Desi".into()),
        description: Set(String::new()),
        logo: Set(String::new()),
        bg_image: Set(String::new()),
        latitude: Set(32.58),
        longitude: Set(73.48),
        ranking: Set(0.0),
        capacity: Set(None),
        status: Set(RestaurantStatus::DeActive),
        created_at: Set(now),
        updated_at: Set(now),
    };
    Ok(am.insert(db).await?)
}

pub async fn table(db: &DatabaseConnection, restaurant_id: Uuid, number: &str) -> Result<dining_table::Model, anyhow::Error> {
    let now = Utc::now();
    let am = dining_table::ActiveModel {
        id: Set(Uuid::new_v4()),
        restaurant_id: Set(restaurant_id),
        table_number: Set(number.to_string()),
        capacity: Set(4),
        status: Set(TableStatus::Available),
        created_at: Set(now),
        updated_at: Set(now),
    };
    Ok(am.insert(db).await?)
}

pub async fn category(db: &DatabaseConnection, restaurant_id: Uuid, name: &str) -> Result<category::Model, anyhow::Error> {
    let now = Utc::now();
    let am = category::ActiveModel {
        id: Set(Uuid::new_v4()),
        restaurant_id: Set(restaurant_id),
        name: Set(name.to_string()),
        imgurl: Set(String::new()),
        created_at: Set(now),
        updated_at: Set(now),
    };
    Ok(am.insert(db).await?)
}

pub async fn dish(db: &DatabaseConnection, category_id: Uuid, name: &str, price: f64) -> Result<dish::Model, anyhow::Error> {
    let now = Utc::now();
    let am = dish::ActiveModel {
        id: Set(Uuid::new_v4()),
        category_id: Set(category_id),
        name: Set(name.to_string()),
        description: Set(None),
        price: Set(price),
        available: Set(true),
        imgurl: Set(String::new()),
        created_at: Set(now),
        updated_at: Set(now),
    };
    Ok(am.insert(db).await?)
}

pub async fn user(db: &DatabaseConnection, email: &str) -> Result<user::Model, anyhow::Error> {
    let now = Utc::now();
    let am = user::ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(email.to_string()),
        password_hash: Set(crate::auth::password::hash_password("Passw0rd!")?),
        name: Set("Guest".into()),
        phone: Set(None),
        city: Set("Lahore".into()),
        address: Set("Gulberg".into()),
        created_at: Set(now),
        updated_at: Set(now),
    };
    Ok(am.insert(db).await?)
}

/// RFC 3339 timestamp `days` from now at 19:00 UTC, comfortably in the future.
pub fn future_at(days: i64, hour: u32, minute: u32) -> String {
    let day = (Utc::now() + Duration::days(days)).date_naive();
    format!("{}T{:02}:{:02}:00Z", day.format("%Y-%m-%d"), hour, minute)
}
