//! Create `order_item` table: cascades with its order, restricts dish deletion.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OrderItem::Table)
                    .if_not_exists()
                    .col(uuid(OrderItem::Id).primary_key())
                    .col(uuid(OrderItem::OrderId).not_null())
                    .col(uuid(OrderItem::DishId).not_null())
                    .col(double(OrderItem::UnitRate).not_null())
                    .col(integer(OrderItem::Quantity).not_null())
                    .col(double(OrderItem::Price).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_item_order")
                            .from(OrderItem::Table, OrderItem::OrderId)
                            .to(Order::Table, Order::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_item_dish")
                            .from(OrderItem::Table, OrderItem::DishId)
                            .to(Dish::Table, Dish::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(OrderItem::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum OrderItem { Table, Id, OrderId, DishId, UnitRate, Quantity, Price }

#[derive(DeriveIden)]
enum Order { Table, Id }

#[derive(DeriveIden)]
enum Dish { Table, Id }
