use serde::{Deserialize, Serialize};
use uuid::Uuid;

use models::{order, order_item};

/// One line of an incoming order. Numbers are taken as sent; `price` is not recomputed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderItemInput {
    #[serde(rename = "dishId")]
    pub dish_id: Option<Uuid>,
    pub unit_rate: Option<f64>,
    pub quantity: Option<i64>,
    pub price: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateOrderInput {
    #[serde(rename = "userId")]
    pub user_id: Option<Uuid>,
    #[serde(rename = "restaurantId")]
    pub restaurant_id: Option<Uuid>,
    #[serde(rename = "orderItems")]
    pub order_items: Option<Vec<OrderItemInput>>,
    #[serde(rename = "totalAmount")]
    pub total_amount: Option<f64>,
    pub order_type: Option<String>,
    pub order_date: Option<String>,
    pub order_time: Option<String>,
    pub contact_info: Option<String>,
    pub table_no: Option<String>,
    pub trnx_id: Option<String>,
    pub trnx_receipt: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateOrderStatusInput {
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserBrief {
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RestaurantName {
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DishBrief {
    pub name: String,
    pub imgurl: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderItemView {
    #[serde(flatten)]
    pub item: order_item::Model,
    pub dish: DishBrief,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderView {
    #[serde(flatten)]
    pub order: order::Model,
    pub user: UserBrief,
    pub restaurant: RestaurantName,
    #[serde(rename = "orderItems")]
    pub order_items: Vec<OrderItemView>,
}

/// Acknowledgement body for a status change.
#[derive(Debug, Clone, Serialize)]
pub struct OrderRef {
    pub id: Uuid,
}
