pub mod errors;
pub mod db;
pub mod status;
pub mod validate;

pub mod restaurant;
pub mod user;
pub mod admin;
pub mod dining_table;
pub mod category;
pub mod dish;
pub mod parking_slot;
pub mod booking;
pub mod order;
pub mod order_item;

pub use status::{AdminRole, BookingStatus, OrderStatus, RestaurantStatus, SlotStatus, TableStatus};

#[cfg(test)]
mod tests;
