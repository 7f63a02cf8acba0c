//! Create `category` table with FK to `restaurant`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Category::Table)
                    .if_not_exists()
                    .col(uuid(Category::Id).primary_key())
                    .col(uuid(Category::RestaurantId).not_null())
                    .col(string_len(Category::Name, 255).not_null())
                    .col(string_len(Category::Imgurl, 1024).not_null())
                    .col(timestamp_with_time_zone(Category::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Category::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_category_restaurant")
                            .from(Category::Table, Category::RestaurantId)
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
                    .name("uniq_category_restaurant_name")
                    .table(Category::Table)
                    .col(Category::RestaurantId)
                    .col(Category::Name)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Category::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Category { Table, Id, RestaurantId, Name, Imgurl, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum Restaurant { Table, Id }
