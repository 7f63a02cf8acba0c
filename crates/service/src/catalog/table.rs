//! Dining tables. Staff may set `status` directly here; bookings drive it otherwise.
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use models::{booking, dining_table, TableStatus};

use super::ensure_restaurant;
use crate::errors::ServiceError;
use crate::util::{any_present, non_empty};

const NUMBER_TAKEN: &str = "Table number already exists for this restaurant";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTableInput {
    pub restaurant_id: Option<Uuid>,
    pub table_number: Option<String>,
    pub capacity: Option<i64>,
    pub status: Option<String>,
}

/// Partial update; `restaurant_id` is required and must own the table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTableInput {
    pub restaurant_id: Option<Uuid>,
    pub table_number: Option<String>,
    pub capacity: Option<i64>,
    pub status: Option<String>,
}

fn positive_capacity(raw: i64) -> Result<i32, ServiceError> {
    i32::try_from(raw)
        .ok()
        .filter(|c| *c > 0)
        .ok_or_else(|| ServiceError::validation("Capacity must be a positive number"))
}

async fn number_taken(db: &DatabaseConnection, restaurant_id: Uuid, number: &str, exclude: Option<Uuid>) -> Result<bool, ServiceError> {
    let mut q = dining_table::Entity::find()
        .filter(dining_table::Column::RestaurantId.eq(restaurant_id))
        .filter(dining_table::Column::TableNumber.eq(number));
    if let Some(id) = exclude {
        q = q.filter(dining_table::Column::Id.ne(id));
    }
    Ok(q.one(db).await?.is_some())
}

#[instrument(skip(db, input), fields(restaurant_id = ?input.restaurant_id))]
pub async fn create_table(db: &DatabaseConnection, input: CreateTableInput) -> Result<dining_table::Model, ServiceError> {
    let (Some(restaurant_id), Some(table_number), Some(capacity), Some(raw_status)) = (
        input.restaurant_id,
        non_empty(input.table_number),
        input.capacity.filter(|c| *c != 0),
        non_empty(input.status),
    ) else {
        return Err(ServiceError::validation("restaurantId, tableNumber, capacity, and status are required"));
    };
    let capacity = positive_capacity(capacity)?;
    let status: TableStatus = raw_status.parse()?;

    ensure_restaurant(db, restaurant_id).await?;
    if number_taken(db, restaurant_id, &table_number, None).await? {
        return Err(ServiceError::conflict(NUMBER_TAKEN));
    }

    let now = Utc::now();
    let created = dining_table::ActiveModel {
        id: Set(Uuid::new_v4()),
        restaurant_id: Set(restaurant_id),
        table_number: Set(table_number),
        capacity: Set(capacity),
        status: Set(status),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await?;
    info!(table_id = %created.id, table_number = %created.table_number, "table_created");
    Ok(created)
}

/// Every table, or only one restaurant's when `restaurant_id` is given.
pub async fn list_tables(db: &DatabaseConnection, restaurant_id: Option<Uuid>) -> Result<Vec<dining_table::Model>, ServiceError> {
    let mut q = dining_table::Entity::find();
    if let Some(rid) = restaurant_id {
        q = q.filter(dining_table::Column::RestaurantId.eq(rid));
    }
    Ok(q.order_by_asc(dining_table::Column::TableNumber).all(db).await?)
}

pub async fn get_table(db: &DatabaseConnection, id: Uuid) -> Result<dining_table::Model, ServiceError> {
    dining_table::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Table"))
}

#[instrument(skip(db, input), fields(table_id = %id))]
pub async fn update_table(db: &DatabaseConnection, id: Uuid, input: UpdateTableInput) -> Result<dining_table::Model, ServiceError> {
    let restaurant_id = input.restaurant_id.ok_or_else(|| ServiceError::validation("restaurantId is required"))?;
    let existing = get_table(db, id).await?;
    ensure_restaurant(db, restaurant_id).await?;
    if existing.restaurant_id != restaurant_id {
        return Err(ServiceError::forbidden("Table does not belong to this restaurant"));
    }

    let table_number = non_empty(input.table_number);
    let capacity = input.capacity.filter(|c| *c != 0);
    let status = non_empty(input.status);
    if !any_present(&[table_number.is_some(), capacity.is_some(), status.is_some()]) {
        return Err(ServiceError::validation("At least one of tableNumber, capacity, or status must be provided"));
    }

    let mut am: dining_table::ActiveModel = existing.into();
    if let Some(number) = table_number {
        if number_taken(db, restaurant_id, &number, Some(id)).await? {
            return Err(ServiceError::conflict(NUMBER_TAKEN));
        }
        am.table_number = Set(number);
    }
    if let Some(c) = capacity {
        am.capacity = Set(positive_capacity(c)?);
    }
    if let Some(s) = status {
        am.status = Set(s.parse::<TableStatus>()?);
    }
    am.updated_at = Set(Utc::now());
    let updated = am.update(db).await?;
    info!(status = ?updated.status, "table_updated");
    Ok(updated)
}

#[instrument(skip(db), fields(table_id = %id))]
pub async fn delete_table(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    let existing = get_table(db, id).await?;
    let booked = booking::Entity::find()
        .filter(booking::Column::TableId.eq(id))
        .one(db)
        .await?
        .is_some();
    if booked {
        return Err(ServiceError::conflict("Cannot delete table with existing bookings"));
    }
    dining_table::Entity::delete_by_id(existing.id).exec(db).await?;
    info!("table_deleted");
    Ok(())
}
