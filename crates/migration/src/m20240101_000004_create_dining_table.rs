//! Create `dining_table` table with FK to `restaurant`.
//!
//! `status` is driven by the booking lifecycle; table numbers are unique per restaurant.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DiningTable::Table)
                    .if_not_exists()
                    .col(uuid(DiningTable::Id).primary_key())
                    .col(uuid(DiningTable::RestaurantId).not_null())
                    .col(string_len(DiningTable::TableNumber, 32).not_null())
                    .col(integer(DiningTable::Capacity).not_null())
                    .col(string_len(DiningTable::Status, 16).not_null())
                    .col(timestamp_with_time_zone(DiningTable::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(DiningTable::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_dining_table_restaurant")
                            .from(DiningTable::Table, DiningTable::RestaurantId)
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
                    .name("uniq_dining_table_restaurant_number")
                    .table(DiningTable::Table)
                    .col(DiningTable::RestaurantId)
                    .col(DiningTable::TableNumber)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(DiningTable::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum DiningTable { Table, Id, RestaurantId, TableNumber, Capacity, Status, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum Restaurant { Table, Id }
