//! Create `booking` table with FKs to `restaurant`, `dining_table` and `user`.
//!
//! Deleting a user keeps the booking row and clears `user_id`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Booking::Table)
                    .if_not_exists()
                    .col(uuid(Booking::Id).primary_key())
                    .col(uuid(Booking::RestaurantId).not_null())
                    .col(uuid(Booking::TableId).not_null())
                    .col(ColumnDef::new(Booking::UserId).uuid().null())
                    .col(string_len(Booking::CustomerName, 255).not_null())
                    .col(string_len(Booking::CustomerEmail, 255).not_null())
                    .col(timestamp_with_time_zone(Booking::BookingDate).not_null())
                    .col(string_len(Booking::Status, 16).not_null())
                    .col(timestamp_with_time_zone(Booking::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Booking::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_restaurant")
                            .from(Booking::Table, Booking::RestaurantId)
                            .to(Restaurant::Table, Restaurant::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_dining_table")
                            .from(Booking::Table, Booking::TableId)
                            .to(DiningTable::Table, DiningTable::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_user")
                            .from(Booking::Table, Booking::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Booking::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Booking {
    Table,
    Id,
    RestaurantId,
    TableId,
    UserId,
    CustomerName,
    CustomerEmail,
    BookingDate,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Restaurant { Table, Id }

#[derive(DeriveIden)]
enum DiningTable { Table, Id }

#[derive(DeriveIden)]
enum User { Table, Id }
