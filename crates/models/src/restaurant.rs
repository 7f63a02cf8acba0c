use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::status::RestaurantStatus;
use crate::{booking, category, dining_table, order, parking_slot};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "restaurant")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub cuisine: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub logo: String,
    pub bg_image: String,
    #[sea_orm(column_type = "Double")]
    pub latitude: f64,
    #[sea_orm(column_type = "Double")]
    pub longitude: f64,
    #[sea_orm(column_type = "Double")]
    pub ranking: f64,
    pub capacity: Option<i32>,
    pub status: RestaurantStatus,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    DiningTable,
    Category,
    ParkingSlot,
    Booking,
    Order,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::DiningTable => Entity::has_many(dining_table::Entity).into(),
            Relation::Category => Entity::has_many(category::Entity).into(),
            Relation::ParkingSlot => Entity::has_many(parking_slot::Entity).into(),
            Relation::Booking => Entity::has_many(booking::Entity).into(),
            Relation::Order => Entity::has_many(order::Entity).into(),
        }
    }
}

impl Related<dining_table::Entity> for Entity {
    fn to() -> RelationDef { Relation::DiningTable.def() }
}

impl Related<category::Entity> for Entity {
    fn to() -> RelationDef { Relation::Category.def() }
}

impl ActiveModelBehavior for ActiveModel {}
