//! Back-office CRUD over the restaurant catalog.
//!
//! Every operation follows the same shape: field validation, existence of the
//! owning rows, natural-key uniqueness scoped to the owner, then a single write.

use sea_orm::{DatabaseConnection, EntityTrait};
use uuid::Uuid;

use crate::errors::ServiceError;

pub mod category;
pub mod dish;
pub mod parking_slot;
pub mod restaurant;
pub mod table;

pub(crate) async fn ensure_restaurant(db: &DatabaseConnection, id: Uuid) -> Result<models::restaurant::Model, ServiceError> {
    models::restaurant::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Restaurant"))
}

/// Listing by owner: the id is mandatory and the restaurant must exist.
pub(crate) async fn listing_restaurant(db: &DatabaseConnection, id: Option<Uuid>) -> Result<Uuid, ServiceError> {
    let id = id.ok_or_else(|| ServiceError::validation("restaurantId is required and must be a valid id"))?;
    ensure_restaurant(db, id).await?;
    Ok(id)
}
