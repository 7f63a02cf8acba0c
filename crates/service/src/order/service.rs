use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use models::validate::is_positive;
use models::{category, dish, order, order_item, restaurant, user, OrderStatus};

use super::domain::{
    CreateOrderInput, DishBrief, OrderItemInput, OrderItemView, OrderRef, OrderView, RestaurantName, UpdateOrderStatusInput,
    UserBrief,
};
use crate::errors::ServiceError;
use crate::metrics::{ORDERS_CREATED_TOTAL, ORDERS_REJECTED_TOTAL};
use crate::util::non_empty;

/// A line that passed validation, ready to insert.
struct ValidItem {
    dish_id: Uuid,
    unit_rate: f64,
    quantity: i32,
    price: f64,
}

struct ValidOrder {
    user_id: Uuid,
    restaurant_id: Uuid,
    total_amount: f64,
    order_type: String,
    items: Vec<ValidItem>,
}

fn required(field: &str) -> ServiceError {
    ServiceError::Validation(format!("{field} is required"))
}

fn check_item(item: &OrderItemInput) -> Result<ValidItem, ServiceError> {
    const MISSING: &str = "Each order item must include dishId, unit_rate, quantity, and price";
    let (Some(dish_id), Some(unit_rate), Some(quantity), Some(price)) = (item.dish_id, item.unit_rate, item.quantity, item.price)
    else {
        return Err(ServiceError::validation(MISSING));
    };
    if unit_rate == 0.0 || quantity == 0 || price == 0.0 {
        return Err(ServiceError::validation(MISSING));
    }
    if !is_positive(unit_rate) || quantity < 0 || !is_positive(price) {
        return Err(ServiceError::validation("unit_rate, quantity, and price must be positive"));
    }
    let quantity = i32::try_from(quantity).map_err(|_| ServiceError::validation("quantity is out of range"))?;
    Ok(ValidItem { dish_id, unit_rate, quantity, price })
}

/// Field checks in the order clients see them, then existence and ownership reads.
async fn validate(db: &DatabaseConnection, input: &CreateOrderInput) -> Result<ValidOrder, ServiceError> {
    let user_id = input.user_id.ok_or_else(|| required("userId"))?;
    let restaurant_id = input.restaurant_id.ok_or_else(|| required("restaurantId"))?;
    let items = match input.order_items.as_deref() {
        Some(items) if !items.is_empty() => items,
        _ => return Err(ServiceError::validation("orderItems is required and must be a non-empty array")),
    };
    let total_amount = input.total_amount.filter(|t| *t != 0.0).ok_or_else(|| required("totalAmount"))?;
    let order_type = non_empty(input.order_type.clone()).ok_or_else(|| required("order_type"))?;
    if !is_positive(total_amount) {
        return Err(ServiceError::validation("totalAmount must be a positive number"));
    }

    user::Entity::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("User"))?;
    restaurant::Entity::find_by_id(restaurant_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Restaurant"))?;

    let mut valid = Vec::with_capacity(items.len());
    for item in items {
        let line = check_item(item)?;
        let (_, cat) = dish::Entity::find_by_id(line.dish_id)
            .find_also_related(category::Entity)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Dish not found: {}", line.dish_id)))?;
        if cat.map(|c| c.restaurant_id) != Some(restaurant_id) {
            return Err(ServiceError::Forbidden(format!(
                "Dish {} does not belong to the specified restaurant",
                line.dish_id
            )));
        }
        valid.push(line);
    }

    Ok(ValidOrder { user_id, restaurant_id, total_amount, order_type, items: valid })
}

/// Validate and persist an order with its items in one transaction.
///
/// Status always starts as `PENDING`; optional text fields default to `""`.
#[instrument(skip(db, input), fields(user_id = ?input.user_id, restaurant_id = ?input.restaurant_id))]
pub async fn create_order(db: &DatabaseConnection, input: CreateOrderInput) -> Result<OrderView, ServiceError> {
    let valid = match validate(db, &input).await {
        Ok(v) => v,
        Err(e) => {
            ORDERS_REJECTED_TOTAL.inc();
            warn!(err = %e, "order_rejected");
            return Err(e);
        }
    };

    let now = Utc::now();
    let txn = db.begin().await?;
    let created = order::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(valid.user_id),
        restaurant_id: Set(valid.restaurant_id),
        total_amount: Set(valid.total_amount),
        order_date: Set(input.order_date.unwrap_or_default()),
        order_time: Set(input.order_time.unwrap_or_default()),
        contact_info: Set(input.contact_info.unwrap_or_default()),
        order_type: Set(valid.order_type),
        table_no: Set(input.table_no.unwrap_or_default()),
        trnx_id: Set(input.trnx_id.unwrap_or_default()),
        trnx_receipt: Set(input.trnx_receipt.unwrap_or_default()),
        status: Set(OrderStatus::Pending),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&txn)
    .await?;

    let rows: Vec<order_item::ActiveModel> = valid
        .items
        .iter()
        .map(|i| order_item::ActiveModel {
            id: Set(Uuid::new_v4()),
            order_id: Set(created.id),
            dish_id: Set(i.dish_id),
            unit_rate: Set(i.unit_rate),
            quantity: Set(i.quantity),
            price: Set(i.price),
        })
        .collect();
    order_item::Entity::insert_many(rows).exec(&txn).await?;

    let view = project(&txn, vec![created])
        .await?
        .pop()
        .ok_or_else(|| ServiceError::Internal("empty order projection".into()))?;
    txn.commit().await?;

    ORDERS_CREATED_TOTAL.inc();
    info!(order_id = %view.order.id, items = view.order_items.len(), total = view.order.total_amount, "order_created");
    Ok(view)
}

/// Attach user email, restaurant name and items with their dish summaries.
async fn project<C: ConnectionTrait>(conn: &C, orders: Vec<order::Model>) -> Result<Vec<OrderView>, ServiceError> {
    let order_ids: Vec<Uuid> = orders.iter().map(|o| o.id).collect();
    let user_ids: Vec<Uuid> = orders.iter().map(|o| o.user_id).collect();
    let restaurant_ids: Vec<Uuid> = orders.iter().map(|o| o.restaurant_id).collect();

    let users: HashMap<Uuid, String> = user::Entity::find()
        .filter(user::Column::Id.is_in(user_ids))
        .all(conn)
        .await?
        .into_iter()
        .map(|u| (u.id, u.email))
        .collect();
    let restaurants: HashMap<Uuid, String> = restaurant::Entity::find()
        .filter(restaurant::Column::Id.is_in(restaurant_ids))
        .all(conn)
        .await?
        .into_iter()
        .map(|r| (r.id, r.name))
        .collect();

    let mut items_by_order: HashMap<Uuid, Vec<OrderItemView>> = HashMap::new();
    let items = order_item::Entity::find()
        .filter(order_item::Column::OrderId.is_in(order_ids))
        .find_also_related(dish::Entity)
        .all(conn)
        .await?;
    for (item, d) in items {
        let dish = d.map(|d| DishBrief { name: d.name, imgurl: d.imgurl }).ok_or_else(|| {
            ServiceError::Internal(format!("order item {} references missing dish", item.id))
        })?;
        items_by_order.entry(item.order_id).or_default().push(OrderItemView { item, dish });
    }

    orders
        .into_iter()
        .map(|o| {
            let email = users
                .get(&o.user_id)
                .cloned()
                .ok_or_else(|| ServiceError::Internal(format!("order {} references missing user", o.id)))?;
            let name = restaurants
                .get(&o.restaurant_id)
                .cloned()
                .ok_or_else(|| ServiceError::Internal(format!("order {} references missing restaurant", o.id)))?;
            Ok(OrderView {
                user: UserBrief { email },
                restaurant: RestaurantName { name },
                order_items: items_by_order.remove(&o.id).unwrap_or_default(),
                order: o,
            })
        })
        .collect()
}

/// All orders of one restaurant, oldest first.
pub async fn list_orders(db: &DatabaseConnection, restaurant_id: Option<Uuid>) -> Result<Vec<OrderView>, ServiceError> {
    let restaurant_id = restaurant_id.ok_or_else(|| ServiceError::validation("restaurantId is required"))?;
    restaurant::Entity::find_by_id(restaurant_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Restaurant"))?;

    let orders = order::Entity::find()
        .filter(order::Column::RestaurantId.eq(restaurant_id))
        .order_by_asc(order::Column::CreatedAt)
        .all(db)
        .await?;
    info!(%restaurant_id, count = orders.len(), "orders_listed");
    project(db, orders).await
}

pub async fn get_order(db: &DatabaseConnection, id: Uuid) -> Result<OrderView, ServiceError> {
    let found = order::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Order"))?;
    project(db, vec![found])
        .await?
        .pop()
        .ok_or_else(|| ServiceError::Internal("empty order projection".into()))
}

/// Change only the status of an order.
#[instrument(skip(db, input), fields(order_id = %id))]
pub async fn update_order_status(db: &DatabaseConnection, id: Uuid, input: UpdateOrderStatusInput) -> Result<OrderRef, ServiceError> {
    let raw = non_empty(input.status).ok_or_else(|| ServiceError::validation("Status is required"))?;
    let status: OrderStatus = raw.parse()?;

    let found = order::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Order"))?;
    let mut am: order::ActiveModel = found.into();
    am.status = Set(status);
    am.updated_at = Set(Utc::now());
    let updated = am.update(db).await?;
    info!(order_id = %updated.id, status = ?updated.status, "order_status_updated");
    Ok(OrderRef { id: updated.id })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::PaginatorTrait;

    use crate::test_support::{self, get_db};

    struct Fixture {
        user_id: Uuid,
        restaurant_id: Uuid,
        dish_id: Uuid,
        foreign_dish_id: Uuid,
    }

    async fn fixture(db: &DatabaseConnection) -> Result<Fixture, anyhow::Error> {
        let u = test_support::user(db, "buyer@mail.com").await?;
        let r = test_support::restaurant(db, "Karachi Kitchen").await?;
        let other = test_support::restaurant(db, "Rival").await?;
        let c = test_support::category(db, r.id, "BBQ").await?;
        let oc = test_support::category(db, other.id, "BBQ").await?;
        let d = test_support::dish(db, c.id, "Seekh Kebab", 800.0).await?;
        let od = test_support::dish(db, oc.id, "Tikka", 900.0).await?;
        Ok(Fixture { user_id: u.id, restaurant_id: r.id, dish_id: d.id, foreign_dish_id: od.id })
    }

    fn line(dish_id: Uuid, quantity: i64, unit_rate: f64) -> OrderItemInput {
        OrderItemInput { dish_id: Some(dish_id), unit_rate: Some(unit_rate), quantity: Some(quantity), price: Some(unit_rate * quantity as f64) }
    }

    fn order_input(f: &Fixture, items: Vec<OrderItemInput>) -> CreateOrderInput {
        CreateOrderInput {
            user_id: Some(f.user_id),
            restaurant_id: Some(f.restaurant_id),
            order_items: Some(items),
            total_amount: Some(1600.0),
            order_type: Some("DINE_IN".into()),
            table_no: Some("T4".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn creates_pending_order_with_items() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let f = fixture(&db).await?;

        let view = create_order(&db, order_input(&f, vec![line(f.dish_id, 2, 800.0)])).await?;
        assert_eq!(view.order.status, OrderStatus::Pending);
        assert_eq!(view.order.order_date, "");
        assert_eq!(view.order.table_no, "T4");
        assert_eq!(view.user.email, "buyer@mail.com");
        assert_eq!(view.restaurant.name, "Karachi Kitchen");
        assert_eq!(view.order_items.len(), 1);
        assert_eq!(view.order_items[0].dish.name, "Seekh Kebab");

        let json = serde_json::to_value(&view)?;
        assert_eq!(json["order_type"], "DINE_IN");
        assert_eq!(json["totalAmount"], 1600.0);
        assert_eq!(json["orderItems"][0]["unit_rate"], 800.0);
        assert_eq!(json["orderItems"][0]["dishId"], f.dish_id.to_string());
        Ok(())
    }

    #[tokio::test]
    async fn price_is_stored_verbatim() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let f = fixture(&db).await?;
        let mut item = line(f.dish_id, 2, 800.0);
        item.price = Some(1.0);

        let view = create_order(&db, order_input(&f, vec![item])).await?;
        assert_eq!(view.order_items[0].item.price, 1.0);
        Ok(())
    }

    #[tokio::test]
    async fn foreign_dish_is_forbidden_and_nothing_persists() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let f = fixture(&db).await?;
        let items = vec![line(f.dish_id, 1, 800.0), line(f.foreign_dish_id, 1, 900.0)];

        let err = create_order(&db, order_input(&f, items)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)), "{err:?}");
        assert_eq!(order::Entity::find().count(&db).await?, 0);
        assert_eq!(order_item::Entity::find().count(&db).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn required_fields_are_reported_in_order() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let f = fixture(&db).await?;

        let mut input = order_input(&f, vec![line(f.dish_id, 1, 800.0)]);
        input.user_id = None;
        input.order_type = None;
        assert_eq!(create_order(&db, input).await.unwrap_err().to_string(), "userId is required");

        let input = order_input(&f, vec![]);
        assert_eq!(
            create_order(&db, input).await.unwrap_err().to_string(),
            "orderItems is required and must be a non-empty array"
        );

        let mut input = order_input(&f, vec![line(f.dish_id, 1, 800.0)]);
        input.total_amount = Some(-5.0);
        assert_eq!(create_order(&db, input).await.unwrap_err().to_string(), "totalAmount must be a positive number");

        let mut bad = line(f.dish_id, 1, 800.0);
        bad.quantity = Some(-1);
        let input = order_input(&f, vec![bad]);
        assert_eq!(
            create_order(&db, input).await.unwrap_err().to_string(),
            "unit_rate, quantity, and price must be positive"
        );
        Ok(())
    }

    #[tokio::test]
    async fn unknown_references_are_not_found() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let f = fixture(&db).await?;

        let mut input = order_input(&f, vec![line(f.dish_id, 1, 800.0)]);
        input.user_id = Some(Uuid::new_v4());
        assert_eq!(create_order(&db, input).await.unwrap_err().to_string(), "User not found");

        let ghost = Uuid::new_v4();
        let input = order_input(&f, vec![line(ghost, 1, 800.0)]);
        assert_eq!(create_order(&db, input).await.unwrap_err().to_string(), format!("Dish not found: {ghost}"));
        Ok(())
    }

    #[tokio::test]
    async fn status_update_and_listing() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let f = fixture(&db).await?;
        let view = create_order(&db, order_input(&f, vec![line(f.dish_id, 2, 800.0)])).await?;

        let err = update_order_status(&db, view.order.id, UpdateOrderStatusInput { status: Some("SHIPPED".into()) })
            .await
            .unwrap_err();
        assert!(!matches!(err, ServiceError::NotFound(_)));
        let missing = update_order_status(&db, Uuid::new_v4(), UpdateOrderStatusInput { status: Some("CONFIRMED".into()) }).await;
        assert!(matches!(missing, Err(ServiceError::NotFound(_))));

        let ack = update_order_status(&db, view.order.id, UpdateOrderStatusInput { status: Some("CONFIRMED".into()) }).await?;
        assert_eq!(ack.id, view.order.id);

        let listed = list_orders(&db, Some(f.restaurant_id)).await?;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].order.status, OrderStatus::Confirmed);
        assert_eq!(listed[0].order_items.len(), 1);

        assert!(matches!(list_orders(&db, None).await, Err(ServiceError::Validation(_))));
        assert!(matches!(list_orders(&db, Some(Uuid::new_v4())).await, Err(ServiceError::NotFound(_))));
        assert_eq!(get_order(&db, view.order.id).await?.order.id, view.order.id);
        Ok(())
    }
}
