//! Table reservation. Non-terminal bookings on one table must sit more than
//! two hours apart.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::status::BookingStatus;
use crate::{dining_table, restaurant, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "booking")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub restaurant_id: Uuid,
    pub table_id: Uuid,
    pub user_id: Option<Uuid>,
    pub customer_name: String,
    pub customer_email: String,
    pub booking_date: DateTimeUtc,
    pub status: BookingStatus,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Restaurant,
    DiningTable,
    User,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Restaurant => Entity::belongs_to(restaurant::Entity)
                .from(Column::RestaurantId)
                .to(restaurant::Column::Id)
                .on_delete(ForeignKeyAction::Restrict)
                .into(),
            Relation::DiningTable => Entity::belongs_to(dining_table::Entity)
                .from(Column::TableId)
                .to(dining_table::Column::Id)
                .on_delete(ForeignKeyAction::Restrict)
                .into(),
            Relation::User => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::Id)
                .on_delete(ForeignKeyAction::SetNull)
                .into(),
        }
    }
}

impl Related<restaurant::Entity> for Entity {
    fn to() -> RelationDef { Relation::Restaurant.def() }
}

impl Related<dining_table::Entity> for Entity {
    fn to() -> RelationDef { Relation::DiningTable.def() }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef { Relation::User.def() }
}

impl ActiveModelBehavior for ActiveModel {}
