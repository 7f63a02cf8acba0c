use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::status::OrderStatus;
use crate::{order_item, restaurant, user};

/// Customer order. Free-form fields keep their snake_case wire names.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "order")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub restaurant_id: Uuid,
    #[sea_orm(column_type = "Double")]
    pub total_amount: f64,
    #[serde(rename = "order_date")]
    pub order_date: String,
    #[serde(rename = "order_time")]
    pub order_time: String,
    #[serde(rename = "contact_info")]
    pub contact_info: String,
    #[serde(rename = "order_type")]
    pub order_type: String,
    #[serde(rename = "table_no")]
    pub table_no: String,
    #[serde(rename = "trnx_id")]
    pub trnx_id: String,
    #[serde(rename = "trnx_receipt")]
    pub trnx_receipt: String,
    pub status: OrderStatus,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    User,
    Restaurant,
    OrderItem,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::Id)
                .on_delete(ForeignKeyAction::Restrict)
                .into(),
            Relation::Restaurant => Entity::belongs_to(restaurant::Entity)
                .from(Column::RestaurantId)
                .to(restaurant::Column::Id)
                .on_delete(ForeignKeyAction::Restrict)
                .into(),
            Relation::OrderItem => Entity::has_many(order_item::Entity).into(),
        }
    }
}

impl Related<order_item::Entity> for Entity {
    fn to() -> RelationDef { Relation::OrderItem.def() }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef { Relation::User.def() }
}

impl Related<restaurant::Entity> for Entity {
    fn to() -> RelationDef { Relation::Restaurant.def() }
}

impl ActiveModelBehavior for ActiveModel {}
