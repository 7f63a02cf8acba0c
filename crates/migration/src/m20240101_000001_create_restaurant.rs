//! Create `restaurant` table.
//!
//! Root entity for multi-tenancy; tables, categories, slots, bookings and orders reference it.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Restaurant::Table)
                    .if_not_exists()
                    .col(uuid(Restaurant::Id).primary_key())
                    .col(string_len(Restaurant::Name, 255).not_null())
                    .col(string_len(Restaurant::Email, 255).unique_key().not_null())
                    .col(string_len(Restaurant::PasswordHash, 255).not_null())
                    .col(string_len(Restaurant::Phone, 50).not_null())
                    .col(string_len(Restaurant::Address, 255).not_null())
                    .col(string_len(Restaurant::City, 255).not_null())
                    .col(string_len(Restaurant::Cuisine, 255).not_null())
                    .col(text(Restaurant::Description).not_null())
                    .col(string_len(Restaurant::Logo, 1024).not_null())
                    .col(string_len(Restaurant::BgImage, 1024).not_null())
                    .col(double(Restaurant::Latitude).not_null())
                    .col(double(Restaurant::Longitude).not_null())
                    .col(double(Restaurant::Ranking).not_null())
                    .col(ColumnDef::new(Restaurant::Capacity).integer().null())
                    .col(string_len(Restaurant::Status, 16).not_null())
                    .col(timestamp_with_time_zone(Restaurant::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Restaurant::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Restaurant::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Restaurant {
    Table,
    Id,
    Name,
    Email,
    PasswordHash,
    Phone,
    Address,
    City,
    Cuisine,
    Description,
    Logo,
    BgImage,
    Latitude,
    Longitude,
    Ranking,
    Capacity,
    Status,
    CreatedAt,
    UpdatedAt,
}
