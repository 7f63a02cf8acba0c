use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use models::{parking_slot, SlotStatus};

use super::{ensure_restaurant, listing_restaurant};
use crate::errors::ServiceError;
use crate::util::non_empty;

const NUMBER_TAKEN: &str = "Slot number already exists for this restaurant";

/// Body for both create and update; every field is required either way.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkingSlotInput {
    pub restaurant_id: Option<Uuid>,
    pub slot_number: Option<String>,
    pub status: Option<String>,
}

fn check(input: ParkingSlotInput) -> Result<(Uuid, String, SlotStatus), ServiceError> {
    let (Some(restaurant_id), Some(slot_number)) = (input.restaurant_id, non_empty(input.slot_number)) else {
        return Err(ServiceError::validation("restaurantId and slotNumber are required"));
    };
    // A missing status reads as an invalid one.
    let status: SlotStatus = input.status.unwrap_or_default().parse()?;
    Ok((restaurant_id, slot_number, status))
}

async fn number_taken(db: &DatabaseConnection, restaurant_id: Uuid, number: &str, exclude: Option<Uuid>) -> Result<bool, ServiceError> {
    let mut q = parking_slot::Entity::find()
        .filter(parking_slot::Column::RestaurantId.eq(restaurant_id))
        .filter(parking_slot::Column::SlotNumber.eq(number));
    if let Some(id) = exclude {
        q = q.filter(parking_slot::Column::Id.ne(id));
    }
    Ok(q.one(db).await?.is_some())
}

async fn find_slot(db: &DatabaseConnection, id: Uuid) -> Result<parking_slot::Model, ServiceError> {
    parking_slot::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Parking slot"))
}

#[instrument(skip(db, input), fields(restaurant_id = ?input.restaurant_id))]
pub async fn create_parking_slot(db: &DatabaseConnection, input: ParkingSlotInput) -> Result<parking_slot::Model, ServiceError> {
    let (restaurant_id, slot_number, status) = check(input)?;
    ensure_restaurant(db, restaurant_id).await?;
    if number_taken(db, restaurant_id, &slot_number, None).await? {
        return Err(ServiceError::conflict(NUMBER_TAKEN));
    }

    let now = Utc::now();
    let created = parking_slot::ActiveModel {
        id: Set(Uuid::new_v4()),
        restaurant_id: Set(restaurant_id),
        slot_number: Set(slot_number),
        status: Set(status),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await?;
    info!(slot_id = %created.id, "parking_slot_created");
    Ok(created)
}

pub async fn list_parking_slots(db: &DatabaseConnection, restaurant_id: Option<Uuid>) -> Result<Vec<parking_slot::Model>, ServiceError> {
    let restaurant_id = listing_restaurant(db, restaurant_id).await?;
    Ok(parking_slot::Entity::find()
        .filter(parking_slot::Column::RestaurantId.eq(restaurant_id))
        .order_by_asc(parking_slot::Column::SlotNumber)
        .all(db)
        .await?)
}

#[instrument(skip(db, input), fields(slot_id = %id))]
pub async fn update_parking_slot(db: &DatabaseConnection, id: Uuid, input: ParkingSlotInput) -> Result<parking_slot::Model, ServiceError> {
    let (restaurant_id, slot_number, status) = check(input)?;
    let existing = find_slot(db, id).await?;
    ensure_restaurant(db, restaurant_id).await?;
    if existing.restaurant_id != restaurant_id {
        return Err(ServiceError::forbidden("Parking slot does not belong to this restaurant"));
    }
    if number_taken(db, restaurant_id, &slot_number, Some(id)).await? {
        return Err(ServiceError::conflict(NUMBER_TAKEN));
    }

    let mut am: parking_slot::ActiveModel = existing.into();
    am.slot_number = Set(slot_number);
    am.status = Set(status);
    am.updated_at = Set(Utc::now());
    let updated = am.update(db).await?;
    info!(status = ?updated.status, "parking_slot_updated");
    Ok(updated)
}

#[instrument(skip(db), fields(slot_id = %id))]
pub async fn delete_parking_slot(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    find_slot(db, id).await?;
    parking_slot::Entity::delete_by_id(id).exec(db).await?;
    info!("parking_slot_deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{self, get_db};

    fn input(rid: Uuid, number: &str, status: Option<&str>) -> ParkingSlotInput {
        ParkingSlotInput { restaurant_id: Some(rid), slot_number: Some(number.into()), status: status.map(Into::into) }
    }

    #[tokio::test]
    async fn slot_lifecycle() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let r = test_support::restaurant(&db, "Garage Grill").await?;
        let other = test_support::restaurant(&db, "Other").await?;

        let missing_status = create_parking_slot(&db, input(r.id, "P1", None)).await.unwrap_err();
        assert_eq!(missing_status.to_string(), "Status must be AVAILABLE, OCCUPIED, or RESERVED");

        let p1 = create_parking_slot(&db, input(r.id, "P1", Some("AVAILABLE"))).await?;
        create_parking_slot(&db, input(r.id, "P2", Some("AVAILABLE"))).await?;
        assert!(matches!(
            create_parking_slot(&db, input(r.id, "P1", Some("AVAILABLE"))).await,
            Err(ServiceError::Conflict(_))
        ));

        assert!(matches!(
            update_parking_slot(&db, p1.id, input(other.id, "P1", Some("OCCUPIED"))).await,
            Err(ServiceError::Forbidden(_))
        ));
        assert!(matches!(
            update_parking_slot(&db, p1.id, input(r.id, "P2", Some("OCCUPIED"))).await,
            Err(ServiceError::Conflict(_))
        ));
        let updated = update_parking_slot(&db, p1.id, input(r.id, "P1", Some("OCCUPIED"))).await?;
        assert_eq!(updated.status, SlotStatus::Occupied);

        assert_eq!(list_parking_slots(&db, Some(r.id)).await?.len(), 2);
        delete_parking_slot(&db, p1.id).await?;
        let gone = delete_parking_slot(&db, p1.id).await.unwrap_err();
        assert_eq!(gone.to_string(), "Parking slot not found");
        Ok(())
    }
}
