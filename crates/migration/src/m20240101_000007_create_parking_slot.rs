//! Create `parking_slot` table with FK to `restaurant`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ParkingSlot::Table)
                    .if_not_exists()
                    .col(uuid(ParkingSlot::Id).primary_key())
                    .col(uuid(ParkingSlot::RestaurantId).not_null())
                    .col(string_len(ParkingSlot::SlotNumber, 32).not_null())
                    .col(string_len(ParkingSlot::Status, 16).not_null())
                    .col(timestamp_with_time_zone(ParkingSlot::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(ParkingSlot::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_parking_slot_restaurant")
                            .from(ParkingSlot::Table, ParkingSlot::RestaurantId)
                            .to(Restaurant::Table, Restaurant::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uniq_parking_slot_restaurant_number")
                    .table(ParkingSlot::Table)
                    .col(ParkingSlot::RestaurantId)
                    .col(ParkingSlot::SlotNumber)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ParkingSlot::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ParkingSlot { Table, Id, RestaurantId, SlotNumber, Status, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum Restaurant { Table, Id }
