use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{dish, order};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "order_item")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub order_id: Uuid,
    pub dish_id: Uuid,
    #[sea_orm(column_type = "Double")]
    #[serde(rename = "unit_rate")]
    pub unit_rate: f64,
    pub quantity: i32,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Order,
    Dish,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Order => Entity::belongs_to(order::Entity)
                .from(Column::OrderId)
                .to(order::Column::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
            Relation::Dish => Entity::belongs_to(dish::Entity)
                .from(Column::DishId)
                .to(dish::Column::Id)
                .on_delete(ForeignKeyAction::Restrict)
                .into(),
        }
    }
}

impl Related<dish::Entity> for Entity {
    fn to() -> RelationDef { Relation::Dish.def() }
}

impl Related<order::Entity> for Entity {
    fn to() -> RelationDef { Relation::Order.def() }
}

impl ActiveModelBehavior for ActiveModel {}
