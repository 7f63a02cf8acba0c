//! Booking consistency: reservations, time-window conflicts and the table
//! status they drive.

pub mod domain;
pub mod service;

pub use service::{create_booking, delete_booking, get_booking, list_bookings, update_booking, CONFLICT_WINDOW_HOURS};
