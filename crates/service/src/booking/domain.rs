use serde::{Deserialize, Serialize};
use uuid::Uuid;

use common::serde_ext::deserialize_some;
use models::booking;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingInput {
    pub restaurant_id: Option<Uuid>,
    pub table_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    /// RFC 3339, `YYYY-MM-DDTHH:MM[:SS]` (server-local) or `YYYY-MM-DD` (UTC)
    pub booking_date: Option<String>,
    pub status: Option<String>,
}

/// Partial update; `userId: null` clears the owner, an absent key leaves it alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingInput {
    pub restaurant_id: Option<Uuid>,
    pub table_id: Option<Uuid>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub user_id: Option<Option<Uuid>>,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub booking_date: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingQuery {
    pub restaurant_id: Option<Uuid>,
    pub table_id: Option<Uuid>,
    pub status: Option<String>,
    pub booking_date: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RestaurantBrief {
    pub name: String,
    pub city: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableBrief {
    pub table_number: String,
    pub capacity: i32,
}

/// Booking row plus the restaurant and table summaries clients render.
#[derive(Debug, Clone, Serialize)]
pub struct BookingView {
    #[serde(flatten)]
    pub booking: booking::Model,
    pub restaurant: RestaurantBrief,
    pub table: TableBrief,
}
