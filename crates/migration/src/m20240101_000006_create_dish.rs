//! Create `dish` table with FK to `category`.
//!
//! Dish names are unique per owning restaurant; that scope goes through the
//! category, so it is enforced by the service layer rather than an index.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Dish::Table)
                    .if_not_exists()
                    .col(uuid(Dish::Id).primary_key())
                    .col(uuid(Dish::CategoryId).not_null())
                    .col(string_len(Dish::Name, 255).not_null())
                    .col(ColumnDef::new(Dish::Description).text().null())
                    .col(double(Dish::Price).not_null())
                    .col(boolean(Dish::Available).not_null())
                    .col(string_len(Dish::Imgurl, 1024).not_null())
                    .col(timestamp_with_time_zone(Dish::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Dish::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_dish_category")
                            .from(Dish::Table, Dish::CategoryId)
                            .to(Category::Table, Category::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Dish::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Dish { Table, Id, CategoryId, Name, Description, Price, Available, Imgurl, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum Category { Table, Id }
