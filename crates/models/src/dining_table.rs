//! A physical table inside a restaurant. `status` follows the booking lifecycle.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::status::TableStatus;
use crate::{booking, restaurant};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "dining_table")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub restaurant_id: Uuid,
    pub table_number: String,
    pub capacity: i32,
    pub status: TableStatus,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Restaurant,
    Booking,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Restaurant => Entity::belongs_to(restaurant::Entity)
                .from(Column::RestaurantId)
                .to(restaurant::Column::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
            Relation::Booking => Entity::has_many(booking::Entity).into(),
        }
    }
}

impl Related<restaurant::Entity> for Entity {
    fn to() -> RelationDef { Relation::Restaurant.def() }
}

impl ActiveModelBehavior for ActiveModel {}
