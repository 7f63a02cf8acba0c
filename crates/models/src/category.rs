use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{dish, restaurant};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "category")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub restaurant_id: Uuid,
    pub name: String,
    pub imgurl: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Restaurant,
    Dish,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Restaurant => Entity::belongs_to(restaurant::Entity)
                .from(Column::RestaurantId)
                .to(restaurant::Column::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
            Relation::Dish => Entity::has_many(dish::Entity).into(),
        }
    }
}

impl Related<restaurant::Entity> for Entity {
    fn to() -> RelationDef { Relation::Restaurant.def() }
}

impl Related<dish::Entity> for Entity {
    fn to() -> RelationDef { Relation::Dish.def() }
}

impl ActiveModelBehavior for ActiveModel {}
