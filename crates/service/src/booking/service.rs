use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use common::pagination::{Page, Pagination};
use models::validate::{local_day_bounds, parse_booking_date};
use models::{booking, dining_table, restaurant, BookingStatus, TableStatus};

use super::domain::{BookingQuery, BookingView, CreateBookingInput, RestaurantBrief, TableBrief, UpdateBookingInput};
use crate::errors::ServiceError;
use crate::metrics::{BOOKINGS_CREATED_TOTAL, BOOKING_CONFLICTS_TOTAL};
use crate::util::non_empty;

/// Half-width of the window around a booking in which the same table cannot be booked again.
pub const CONFLICT_WINDOW_HOURS: i64 = 2;

const REQUIRED_MSG: &str = "restaurantId, tableId, customerName, customerEmail, bookingDate, and status are required";
const DATE_MSG: &str = "bookingDate must be a valid future date";
const TABLE_MSG: &str = "Table not found or does not belong to restaurant";
const CONFLICT_MSG: &str = "Table is already booked for the requested time";

fn future_date(raw: &str) -> Result<DateTime<Utc>, ServiceError> {
    match parse_booking_date(raw) {
        Some(at) if at > Utc::now() => Ok(at),
        _ => Err(ServiceError::validation(DATE_MSG)),
    }
}

/// First non-terminal booking on `table_id` within ±[`CONFLICT_WINDOW_HOURS`] of `at`.
async fn find_conflict<C: ConnectionTrait>(
    conn: &C,
    table_id: Uuid,
    at: DateTime<Utc>,
    exclude: Option<Uuid>,
) -> Result<Option<booking::Model>, ServiceError> {
    let window = Duration::hours(CONFLICT_WINDOW_HOURS);
    let mut q = booking::Entity::find()
        .filter(booking::Column::TableId.eq(table_id))
        .filter(booking::Column::BookingDate.between(at - window, at + window))
        .filter(booking::Column::Status.is_not_in(BookingStatus::TERMINAL));
    if let Some(id) = exclude {
        q = q.filter(booking::Column::Id.ne(id));
    }
    Ok(q.one(conn).await?)
}

async fn set_table_status<C: ConnectionTrait>(conn: &C, table_id: Uuid, status: TableStatus) -> Result<(), ServiceError> {
    dining_table::Entity::update_many()
        .col_expr(dining_table::Column::Status, Expr::value(status))
        .col_expr(dining_table::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(dining_table::Column::Id.eq(table_id))
        .exec(conn)
        .await?;
    Ok(())
}

async fn table_in_restaurant(db: &DatabaseConnection, table_id: Uuid, restaurant_id: Uuid) -> Result<dining_table::Model, ServiceError> {
    dining_table::Entity::find_by_id(table_id)
        .one(db)
        .await?
        .filter(|t| t.restaurant_id == restaurant_id)
        .ok_or_else(|| ServiceError::NotFound(TABLE_MSG.into()))
}

async fn ensure_restaurant(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    restaurant::Entity::find_by_id(id)
        .one(db)
        .await?
        .map(|_| ())
        .ok_or_else(|| ServiceError::not_found("Restaurant"))
}

/// Attach restaurant and table summaries, batch-loading each side once.
async fn project<C: ConnectionTrait>(conn: &C, rows: Vec<booking::Model>) -> Result<Vec<BookingView>, ServiceError> {
    let restaurant_ids: Vec<Uuid> = rows.iter().map(|b| b.restaurant_id).collect();
    let table_ids: Vec<Uuid> = rows.iter().map(|b| b.table_id).collect();

    let restaurants: HashMap<Uuid, restaurant::Model> = restaurant::Entity::find()
        .filter(restaurant::Column::Id.is_in(restaurant_ids))
        .all(conn)
        .await?
        .into_iter()
        .map(|r| (r.id, r))
        .collect();
    let tables: HashMap<Uuid, dining_table::Model> = dining_table::Entity::find()
        .filter(dining_table::Column::Id.is_in(table_ids))
        .all(conn)
        .await?
        .into_iter()
        .map(|t| (t.id, t))
        .collect();

    rows.into_iter()
        .map(|b| {
            let r = restaurants
                .get(&b.restaurant_id)
                .ok_or_else(|| ServiceError::Internal(format!("booking {} references missing restaurant", b.id)))?;
            let t = tables
                .get(&b.table_id)
                .ok_or_else(|| ServiceError::Internal(format!("booking {} references missing table", b.id)))?;
            Ok(BookingView {
                restaurant: RestaurantBrief { name: r.name.clone(), city: r.city.clone() },
                table: TableBrief { table_number: t.table_number.clone(), capacity: t.capacity },
                booking: b,
            })
        })
        .collect()
}

async fn project_one<C: ConnectionTrait>(conn: &C, row: booking::Model) -> Result<BookingView, ServiceError> {
    project(conn, vec![row])
        .await?
        .pop()
        .ok_or_else(|| ServiceError::Internal("empty booking projection".into()))
}

/// Create a booking and reserve its table.
///
/// The conflict check, the insert and the table update share one transaction.
#[instrument(skip(db, input), fields(restaurant_id = ?input.restaurant_id, table_id = ?input.table_id))]
pub async fn create_booking(db: &DatabaseConnection, input: CreateBookingInput) -> Result<BookingView, ServiceError> {
    let (Some(restaurant_id), Some(table_id), Some(customer_name), Some(customer_email), Some(raw_date), Some(raw_status)) = (
        input.restaurant_id,
        input.table_id,
        non_empty(input.customer_name),
        non_empty(input.customer_email),
        non_empty(input.booking_date),
        non_empty(input.status),
    ) else {
        return Err(ServiceError::validation(REQUIRED_MSG));
    };
    let status: BookingStatus = raw_status.parse()?;
    let booking_date = future_date(&raw_date)?;

    ensure_restaurant(db, restaurant_id).await?;
    table_in_restaurant(db, table_id, restaurant_id).await?;

    let txn = db.begin().await?;
    if let Some(existing) = find_conflict(&txn, table_id, booking_date, None).await? {
        BOOKING_CONFLICTS_TOTAL.inc();
        warn!(%table_id, conflicting_id = %existing.id, "booking_conflict");
        return Err(ServiceError::conflict(CONFLICT_MSG));
    }

    let now = Utc::now();
    let created = booking::ActiveModel {
        id: Set(Uuid::new_v4()),
        restaurant_id: Set(restaurant_id),
        table_id: Set(table_id),
        user_id: Set(input.user_id),
        customer_name: Set(customer_name),
        customer_email: Set(customer_email),
        booking_date: Set(booking_date),
        status: Set(status),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&txn)
    .await?;
    set_table_status(&txn, table_id, TableStatus::Reserved).await?;
    let view = project_one(&txn, created).await?;
    txn.commit().await?;

    BOOKINGS_CREATED_TOTAL.inc();
    info!(booking_id = %view.booking.id, %table_id, at = %booking_date, "booking_created");
    Ok(view)
}

pub async fn get_booking(db: &DatabaseConnection, id: Uuid) -> Result<BookingView, ServiceError> {
    let row = booking::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Booking"))?;
    project_one(db, row).await
}

/// Apply a partial update.
///
/// Table side effects, in order of precedence:
/// - a terminal requested status releases the (post-update) table;
/// - otherwise moving to another table reserves the new one and releases the old one.
#[instrument(skip(db, input), fields(booking_id = %id))]
pub async fn update_booking(db: &DatabaseConnection, id: Uuid, input: UpdateBookingInput) -> Result<BookingView, ServiceError> {
    let existing = booking::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Booking"))?;

    let customer_name = non_empty(input.customer_name);
    let customer_email = non_empty(input.customer_email);
    let raw_date = non_empty(input.booking_date);
    let raw_status = non_empty(input.status);
    if input.restaurant_id.is_none()
        && input.table_id.is_none()
        && input.user_id.is_none()
        && customer_name.is_none()
        && customer_email.is_none()
        && raw_date.is_none()
        && raw_status.is_none()
    {
        return Err(ServiceError::validation("At least one field must be provided for update"));
    }

    let status = raw_status.as_deref().map(str::parse::<BookingStatus>).transpose()?;
    if let Some(restaurant_id) = input.restaurant_id {
        ensure_restaurant(db, restaurant_id).await?;
    }

    let mut recheck: Option<(Uuid, DateTime<Utc>)> = None;
    let mut new_date = None;
    if input.table_id.is_some() || raw_date.is_some() {
        let table_id = input.table_id.unwrap_or(existing.table_id);
        let owner = input.restaurant_id.unwrap_or(existing.restaurant_id);
        table_in_restaurant(db, table_id, owner).await?;
        let at = match raw_date.as_deref() {
            Some(raw) => {
                let at = future_date(raw)?;
                new_date = Some(at);
                at
            }
            None => existing.booking_date,
        };
        recheck = Some((table_id, at));
    }

    let txn = db.begin().await?;
    if let Some((table_id, at)) = recheck {
        if let Some(other) = find_conflict(&txn, table_id, at, Some(id)).await? {
            BOOKING_CONFLICTS_TOTAL.inc();
            warn!(%table_id, conflicting_id = %other.id, "booking_conflict");
            return Err(ServiceError::conflict(CONFLICT_MSG));
        }
    }

    let old_table = existing.table_id;
    let mut am: booking::ActiveModel = existing.into();
    if let Some(v) = input.restaurant_id { am.restaurant_id = Set(v); }
    if let Some(v) = input.table_id { am.table_id = Set(v); }
    if let Some(v) = input.user_id { am.user_id = Set(v); }
    if let Some(v) = customer_name { am.customer_name = Set(v); }
    if let Some(v) = customer_email { am.customer_email = Set(v); }
    if let Some(v) = new_date { am.booking_date = Set(v); }
    if let Some(v) = status { am.status = Set(v); }
    am.updated_at = Set(Utc::now());
    let updated = am.update(&txn).await?;

    if status.is_some_and(BookingStatus::is_terminal) {
        set_table_status(&txn, updated.table_id, TableStatus::Available).await?;
    } else if let Some(new_table) = input.table_id.filter(|t| *t != old_table) {
        set_table_status(&txn, new_table, TableStatus::Reserved).await?;
        set_table_status(&txn, old_table, TableStatus::Available).await?;
    }

    let view = project_one(&txn, updated).await?;
    txn.commit().await?;
    info!(booking_id = %id, status = ?view.booking.status, table_id = %view.booking.table_id, "booking_updated");
    Ok(view)
}

/// Delete a booking and release its table in one transaction.
#[instrument(skip(db))]
pub async fn delete_booking(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    let existing = booking::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Booking"))?;

    let txn = db.begin().await?;
    booking::Entity::delete_by_id(id).exec(&txn).await?;
    set_table_status(&txn, existing.table_id, TableStatus::Available).await?;
    txn.commit().await?;
    info!(booking_id = %id, table_id = %existing.table_id, "booking_deleted");
    Ok(())
}

fn sort_column(sort_by: Option<&str>) -> booking::Column {
    match sort_by {
        Some("createdAt") => booking::Column::CreatedAt,
        Some("updatedAt") => booking::Column::UpdatedAt,
        Some("customerName") => booking::Column::CustomerName,
        Some("status") => booking::Column::Status,
        _ => booking::Column::BookingDate,
    }
}

fn sort_order(raw: Option<&str>) -> Order {
    match raw {
        Some(o) if o.eq_ignore_ascii_case("desc") => Order::Desc,
        _ => Order::Asc,
    }
}

/// Filtered, sorted, paginated booking list.
///
/// `bookingDate` selects the whole server-local calendar day containing it;
/// unparsable dates are ignored rather than rejected.
pub async fn list_bookings(db: &DatabaseConnection, query: BookingQuery) -> Result<Page<BookingView>, ServiceError> {
    let pagination = Pagination::new(query.page, query.limit);

    let mut q = booking::Entity::find();
    if let Some(r) = query.restaurant_id {
        q = q.filter(booking::Column::RestaurantId.eq(r));
    }
    if let Some(t) = query.table_id {
        q = q.filter(booking::Column::TableId.eq(t));
    }
    if let Some(raw) = non_empty(query.status) {
        let status: BookingStatus = raw.parse()?;
        q = q.filter(booking::Column::Status.eq(status));
    }
    if let Some((start, end)) = query.booking_date.as_deref().and_then(local_day_bounds) {
        q = q.filter(booking::Column::BookingDate.between(start, end));
    }

    let total = q.clone().count(db).await?;
    let rows = q
        .order_by(sort_column(query.sort_by.as_deref()), sort_order(query.sort_order.as_deref()))
        .order_by_asc(booking::Column::Id)
        .paginate(db, pagination.limit)
        .fetch_page(pagination.page_index())
        .await?;

    Ok(Page { data: project(db, rows).await?, pagination: pagination.meta(total) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{self, future_at, get_db};

    fn create_input(restaurant_id: Uuid, table_id: Uuid, at: &str) -> CreateBookingInput {
        CreateBookingInput {
            restaurant_id: Some(restaurant_id),
            table_id: Some(table_id),
            user_id: None,
            customer_name: Some("Ayesha".into()),
            customer_email: Some("ayesha@mail.com".into()),
            booking_date: Some(at.to_string()),
            status: Some("CONFIRMED".into()),
        }
    }

    async fn table_status(db: &DatabaseConnection, id: Uuid) -> Result<TableStatus, anyhow::Error> {
        let t = dining_table::Entity::find_by_id(id).one(db).await?.ok_or_else(|| anyhow::anyhow!("table gone"))?;
        Ok(t.status)
    }

    #[tokio::test]
    async fn conflict_window_scenario() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let r = test_support::restaurant(&db, "Lahori Grill").await?;
        let t = test_support::table(&db, r.id, "T1").await?;

        let first = create_booking(&db, create_input(r.id, t.id, &future_at(30, 19, 0))).await?;
        assert_eq!(first.restaurant.name, "Lahori Grill");
        assert_eq!(first.table.capacity, 4);
        assert_eq!(table_status(&db, t.id).await?, TableStatus::Reserved);

        let err = create_booking(&db, create_input(r.id, t.id, &future_at(30, 20, 30))).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)), "{err:?}");

        create_booking(&db, create_input(r.id, t.id, &future_at(30, 22, 0))).await?;
        Ok(())
    }

    #[tokio::test]
    async fn window_edges_are_inclusive() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let r = test_support::restaurant(&db, "Edge").await?;
        let t = test_support::table(&db, r.id, "T1").await?;
        create_booking(&db, create_input(r.id, t.id, &future_at(10, 12, 0))).await?;

        let exactly_two_hours = create_booking(&db, create_input(r.id, t.id, &future_at(10, 14, 0))).await;
        assert!(matches!(exactly_two_hours, Err(ServiceError::Conflict(_))));
        create_booking(&db, create_input(r.id, t.id, &future_at(10, 14, 1))).await?;
        Ok(())
    }

    #[tokio::test]
    async fn terminal_bookings_do_not_conflict() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let r = test_support::restaurant(&db, "Cafe").await?;
        let t = test_support::table(&db, r.id, "T1").await?;
        let mut input = create_input(r.id, t.id, &future_at(5, 19, 0));
        input.status = Some("CANCELLED".into());
        create_booking(&db, input).await?;

        create_booking(&db, create_input(r.id, t.id, &future_at(5, 19, 30))).await?;
        Ok(())
    }

    #[tokio::test]
    async fn create_validates_before_touching_tables() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let r = test_support::restaurant(&db, "Cafe").await?;
        let other = test_support::restaurant(&db, "Other").await?;
        let t = test_support::table(&db, r.id, "T1").await?;

        let mut missing = create_input(r.id, t.id, &future_at(1, 19, 0));
        missing.customer_email = Some(String::new());
        assert_eq!(create_booking(&db, missing).await.unwrap_err().to_string(), REQUIRED_MSG);

        let past = create_input(r.id, t.id, "2001-01-01T19:00:00Z");
        assert_eq!(create_booking(&db, past).await.unwrap_err().to_string(), DATE_MSG);

        let mut bad_status = create_input(r.id, t.id, &future_at(1, 19, 0));
        bad_status.status = Some("SEATED".into());
        assert!(matches!(create_booking(&db, bad_status).await, Err(ServiceError::Model(_))));

        let foreign = create_input(other.id, t.id, &future_at(1, 19, 0));
        assert!(matches!(create_booking(&db, foreign).await, Err(ServiceError::NotFound(_))));

        let ghost = create_input(Uuid::new_v4(), t.id, &future_at(1, 19, 0));
        assert_eq!(create_booking(&db, ghost).await.unwrap_err().to_string(), "Restaurant not found");

        assert_eq!(table_status(&db, t.id).await?, TableStatus::Available);
        Ok(())
    }

    #[tokio::test]
    async fn cancelling_releases_table() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let r = test_support::restaurant(&db, "Cafe").await?;
        let t = test_support::table(&db, r.id, "T1").await?;
        let b = create_booking(&db, create_input(r.id, t.id, &future_at(3, 19, 0))).await?;

        let patch = UpdateBookingInput { status: Some("CANCELLED".into()), ..Default::default() };
        let updated = update_booking(&db, b.booking.id, patch).await?;
        assert_eq!(updated.booking.status, BookingStatus::Cancelled);
        assert_eq!(table_status(&db, t.id).await?, TableStatus::Available);
        Ok(())
    }

    #[tokio::test]
    async fn moving_tables_swaps_reservation() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let r = test_support::restaurant(&db, "Cafe").await?;
        let t1 = test_support::table(&db, r.id, "T1").await?;
        let t2 = test_support::table(&db, r.id, "T2").await?;
        let b = create_booking(&db, create_input(r.id, t1.id, &future_at(3, 19, 0))).await?;

        let patch = UpdateBookingInput { table_id: Some(t2.id), ..Default::default() };
        let moved = update_booking(&db, b.booking.id, patch).await?;
        assert_eq!(moved.table.table_number, "T2");
        assert_eq!(table_status(&db, t1.id).await?, TableStatus::Available);
        assert_eq!(table_status(&db, t2.id).await?, TableStatus::Reserved);
        Ok(())
    }

    #[tokio::test]
    async fn moving_an_already_cancelled_booking_still_reserves_new_table() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let r = test_support::restaurant(&db, "Cafe").await?;
        let t1 = test_support::table(&db, r.id, "T1").await?;
        let t2 = test_support::table(&db, r.id, "T2").await?;
        let mut input = create_input(r.id, t1.id, &future_at(3, 19, 0));
        input.status = Some("CANCELLED".into());
        let b = create_booking(&db, input).await?;

        let patch = UpdateBookingInput { table_id: Some(t2.id), ..Default::default() };
        update_booking(&db, b.booking.id, patch).await?;
        assert_eq!(table_status(&db, t2.id).await?, TableStatus::Reserved);
        assert_eq!(table_status(&db, t1.id).await?, TableStatus::Available);
        Ok(())
    }

    // Terminal status wins over the table move: the new table is released and
    // the old one keeps its reservation.
    #[tokio::test]
    async fn cancel_and_move_in_one_update_leaves_old_table_reserved() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let r = test_support::restaurant(&db, "Cafe").await?;
        let t1 = test_support::table(&db, r.id, "T1").await?;
        let t2 = test_support::table(&db, r.id, "T2").await?;
        let b = create_booking(&db, create_input(r.id, t1.id, &future_at(3, 19, 0))).await?;

        let patch = UpdateBookingInput { table_id: Some(t2.id), status: Some("CANCELLED".into()), ..Default::default() };
        let updated = update_booking(&db, b.booking.id, patch).await?;
        assert_eq!(updated.booking.status, BookingStatus::Cancelled);
        assert_eq!(updated.booking.table_id, t2.id);
        assert_eq!(table_status(&db, t1.id).await?, TableStatus::Reserved);
        assert_eq!(table_status(&db, t2.id).await?, TableStatus::Available);
        Ok(())
    }

    #[tokio::test]
    async fn update_rechecks_conflicts_excluding_itself() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let r = test_support::restaurant(&db, "Cafe").await?;
        let t = test_support::table(&db, r.id, "T1").await?;
        let a = create_booking(&db, create_input(r.id, t.id, &future_at(4, 12, 0))).await?;
        create_booking(&db, create_input(r.id, t.id, &future_at(4, 18, 0))).await?;

        let nudge = UpdateBookingInput { booking_date: Some(future_at(4, 12, 30)), ..Default::default() };
        update_booking(&db, a.booking.id, nudge).await?;

        let clash = UpdateBookingInput { booking_date: Some(future_at(4, 17, 0)), ..Default::default() };
        let err = update_booking(&db, a.booking.id, clash).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
        Ok(())
    }

    #[tokio::test]
    async fn update_requires_a_field_and_can_clear_user() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let r = test_support::restaurant(&db, "Cafe").await?;
        let t = test_support::table(&db, r.id, "T1").await?;
        let u = test_support::user(&db, "guest@mail.com").await?;
        let mut input = create_input(r.id, t.id, &future_at(2, 19, 0));
        input.user_id = Some(u.id);
        let b = create_booking(&db, input).await?;
        assert_eq!(b.booking.user_id, Some(u.id));

        let err = update_booking(&db, b.booking.id, UpdateBookingInput::default()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        let clear = UpdateBookingInput { user_id: Some(None), ..Default::default() };
        let cleared = update_booking(&db, b.booking.id, clear).await?;
        assert_eq!(cleared.booking.user_id, None);
        Ok(())
    }

    #[tokio::test]
    async fn delete_releases_table_and_missing_is_not_found() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let r = test_support::restaurant(&db, "Cafe").await?;
        let t = test_support::table(&db, r.id, "T1").await?;
        let b = create_booking(&db, create_input(r.id, t.id, &future_at(2, 19, 0))).await?;

        delete_booking(&db, b.booking.id).await?;
        assert_eq!(table_status(&db, t.id).await?, TableStatus::Available);
        assert!(matches!(delete_booking(&db, b.booking.id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(get_booking(&db, b.booking.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn list_filters_sorts_and_paginates() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let r = test_support::restaurant(&db, "Cafe").await?;
        let t1 = test_support::table(&db, r.id, "T1").await?;
        let t2 = test_support::table(&db, r.id, "T2").await?;
        for (table, hour) in [(t1.id, 10), (t1.id, 15), (t1.id, 20), (t2.id, 12)] {
            create_booking(&db, create_input(r.id, table, &future_at(6, hour, 0))).await?;
        }

        let q = BookingQuery { table_id: Some(t1.id), limit: Some(2), sort_order: Some("desc".into()), ..Default::default() };
        let page = list_bookings(&db, q).await?;
        assert_eq!(page.pagination.total, 3);
        assert_eq!(page.pagination.total_pages, 2);
        assert_eq!(page.data.len(), 2);
        assert!(page.data[0].booking.booking_date > page.data[1].booking.booking_date);

        let q = BookingQuery { page: Some(2), limit: Some(2), table_id: Some(t1.id), ..Default::default() };
        let second = list_bookings(&db, q).await?;
        assert_eq!(second.data.len(), 1);

        let q = BookingQuery { booking_date: Some("not a date".into()), ..Default::default() };
        assert_eq!(list_bookings(&db, q).await?.pagination.total, 4);
        Ok(())
    }

    #[tokio::test]
    async fn list_date_filter_selects_local_day() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let r = test_support::restaurant(&db, "Cafe").await?;
        let t = test_support::table(&db, r.id, "T1").await?;
        let day = (Utc::now() + Duration::days(8)).date_naive();
        let other_day = day + Duration::days(3);
        for d in [day, other_day] {
            let local_noon = format!("{}T12:00:00", d.format("%Y-%m-%d"));
            create_booking(&db, create_input(r.id, t.id, &local_noon)).await?;
        }

        let q = BookingQuery { booking_date: Some(format!("{}T08:00", day.format("%Y-%m-%d"))), ..Default::default() };
        let page = list_bookings(&db, q).await?;
        assert_eq!(page.pagination.total, 1);
        Ok(())
    }
}
