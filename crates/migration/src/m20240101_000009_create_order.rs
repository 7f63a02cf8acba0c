//! Create `order` table with FKs to `user` and `restaurant`.
//!
//! Snake-case request fields (`order_type`, `trnx_id`, ...) map 1:1 onto columns here.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Order::Table)
                    .if_not_exists()
                    .col(uuid(Order::Id).primary_key())
                    .col(uuid(Order::UserId).not_null())
                    .col(uuid(Order::RestaurantId).not_null())
                    .col(double(Order::TotalAmount).not_null())
                    .col(string_len(Order::OrderDate, 64).not_null())
                    .col(string_len(Order::OrderTime, 64).not_null())
                    .col(string_len(Order::ContactInfo, 255).not_null())
                    .col(string_len(Order::OrderType, 64).not_null())
                    .col(string_len(Order::TableNo, 32).not_null())
                    .col(string_len(Order::TrnxId, 255).not_null())
                    .col(string_len(Order::TrnxReceipt, 1024).not_null())
                    .col(string_len(Order::Status, 16).not_null())
                    .col(timestamp_with_time_zone(Order::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Order::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_user")
                            .from(Order::Table, Order::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_restaurant")
                            .from(Order::Table, Order::RestaurantId)
                            .to(Restaurant::Table, Restaurant::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Order::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Order {
    Table,
    Id,
    UserId,
    RestaurantId,
    TotalAmount,
    OrderDate,
    OrderTime,
    ContactInfo,
    OrderType,
    TableNo,
    TrnxId,
    TrnxReceipt,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum User { Table, Id }

#[derive(DeriveIden)]
enum Restaurant { Table, Id }
