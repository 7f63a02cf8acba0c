//! Order ingestion: validate an order against catalog data and persist it
//! together with its items.

pub mod domain;
pub mod service;

pub use service::{create_order, get_order, list_orders, update_order_status};
