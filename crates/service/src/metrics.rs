//! Business counters on the default Prometheus registry, scraped via `GET /metrics`.
use once_cell::sync::Lazy;
use prometheus::{register_int_counter, IntCounter};

pub static BOOKINGS_CREATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "dinehub_bookings_created_total",
        "Total bookings created"
    )
    .expect("register bookings_created_total")
});

pub static BOOKING_CONFLICTS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "dinehub_booking_conflicts_total",
        "Total booking requests rejected by the time-window check"
    )
    .expect("register booking_conflicts_total")
});

pub static ORDERS_CREATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "dinehub_orders_created_total",
        "Total orders persisted"
    )
    .expect("register orders_created_total")
});

pub static ORDERS_REJECTED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "dinehub_orders_rejected_total",
        "Total order requests rejected during validation"
    )
    .expect("register orders_rejected_total")
});

/// Touch every counter so they appear in the first scrape at zero.
pub fn init() {
    Lazy::force(&BOOKINGS_CREATED_TOTAL);
    Lazy::force(&BOOKING_CONFLICTS_TOTAL);
    Lazy::force(&ORDERS_CREATED_TOTAL);
    Lazy::force(&ORDERS_REJECTED_TOTAL);
}
