//! Lookup indexes for the hot read paths: booking conflict scans, per-restaurant listings
//! and dish-by-category joins.
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_booking_table_date")
                    .table(Booking::Table)
                    .col(Booking::TableId)
                    .col(Booking::BookingDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_booking_restaurant")
                    .table(Booking::Table)
                    .col(Booking::RestaurantId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_order_restaurant")
                    .table(Order::Table)
                    .col(Order::RestaurantId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_dish_category")
                    .table(Dish::Table)
                    .col(Dish::CategoryId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_index(Index::drop().name("idx_dish_category").table(Dish::Table).to_owned()).await?;
        manager.drop_index(Index::drop().name("idx_order_restaurant").table(Order::Table).to_owned()).await?;
        manager.drop_index(Index::drop().name("idx_booking_restaurant").table(Booking::Table).to_owned()).await?;
        manager.drop_index(Index::drop().name("idx_booking_table_date").table(Booking::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Booking { Table, TableId, BookingDate, RestaurantId }

#[derive(DeriveIden)]
enum Order { Table, RestaurantId }

#[derive(DeriveIden)]
enum Dish { Table, CategoryId }
