//! Dishes. A dish belongs to a restaurant only through its category.
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use models::validate::{is_http_url, is_positive};
use models::{category, dish, order_item};

use super::listing_restaurant;
use crate::errors::ServiceError;
use crate::util::non_empty;

const NAME_TAKEN: &str = "Dish name already exists for this restaurant";

/// Create and update share one body; PUT replaces `description`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DishInput {
    pub category_id: Option<Uuid>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub available: Option<bool>,
    pub imgurl: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryName {
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DishView {
    #[serde(flatten)]
    pub dish: dish::Model,
    pub category: CategoryName,
}

struct Checked {
    category_id: Uuid,
    name: String,
    price: f64,
}

fn check(input: &DishInput) -> Result<Checked, ServiceError> {
    let (Some(category_id), Some(name), Some(price)) =
        (input.category_id, non_empty(input.name.clone()), input.price)
    else {
        return Err(ServiceError::validation("categoryId, name, and price are required"));
    };
    if !is_positive(price) {
        return Err(ServiceError::validation("Price must be a positive number"));
    }
    if let Some(u) = input.imgurl.as_deref() {
        if !u.is_empty() && !is_http_url(u) {
            return Err(ServiceError::validation("imgurl must be a valid URL"));
        }
    }
    Ok(Checked { category_id, name, price })
}

async fn find_category(db: &DatabaseConnection, id: Uuid) -> Result<category::Model, ServiceError> {
    category::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Category"))
}

async fn name_taken(db: &DatabaseConnection, restaurant_id: Uuid, name: &str, exclude: Option<Uuid>) -> Result<bool, ServiceError> {
    let mut q = dish::Entity::find()
        .inner_join(category::Entity)
        .filter(category::Column::RestaurantId.eq(restaurant_id))
        .filter(dish::Column::Name.eq(name));
    if let Some(id) = exclude {
        q = q.filter(dish::Column::Id.ne(id));
    }
    Ok(q.one(db).await?.is_some())
}

fn view(dish: dish::Model, category: &category::Model) -> DishView {
    DishView { dish, category: CategoryName { name: category.name.clone() } }
}

#[instrument(skip(db, input), fields(category_id = ?input.category_id))]
pub async fn create_dish(db: &DatabaseConnection, input: DishInput) -> Result<DishView, ServiceError> {
    let c = check(&input)?;
    let cat = find_category(db, c.category_id).await?;
    if name_taken(db, cat.restaurant_id, &c.name, None).await? {
        return Err(ServiceError::conflict(NAME_TAKEN));
    }

    let now = Utc::now();
    let created = dish::ActiveModel {
        id: Set(Uuid::new_v4()),
        category_id: Set(cat.id),
        name: Set(c.name),
        description: Set(non_empty(input.description)),
        price: Set(c.price),
        available: Set(input.available.unwrap_or(true)),
        imgurl: Set(input.imgurl.unwrap_or_default()),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await?;
    info!(dish_id = %created.id, restaurant_id = %cat.restaurant_id, "dish_created");
    Ok(view(created, &cat))
}

/// Every dish across the restaurant's categories.
pub async fn list_dishes(db: &DatabaseConnection, restaurant_id: Option<Uuid>) -> Result<Vec<DishView>, ServiceError> {
    let restaurant_id = listing_restaurant(db, restaurant_id).await?;
    let rows = dish::Entity::find()
        .find_also_related(category::Entity)
        .filter(category::Column::RestaurantId.eq(restaurant_id))
        .order_by_asc(dish::Column::Name)
        .all(db)
        .await?;
    Ok(rows
        .into_iter()
        .filter_map(|(d, c)| c.map(|c| view(d, &c)))
        .collect())
}

#[instrument(skip(db, input), fields(dish_id = %id))]
pub async fn update_dish(db: &DatabaseConnection, id: Uuid, input: DishInput) -> Result<DishView, ServiceError> {
    let c = check(&input)?;
    let (existing, current_cat) = dish::Entity::find_by_id(id)
        .find_also_related(category::Entity)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Dish"))?;
    let current_cat = current_cat.ok_or_else(|| ServiceError::Internal(format!("dish {id} has no category")))?;

    let target = find_category(db, c.category_id).await?;
    if target.restaurant_id != current_cat.restaurant_id {
        return Err(ServiceError::forbidden("Category does not belong to the same restaurant as the dish"));
    }
    if name_taken(db, target.restaurant_id, &c.name, Some(id)).await? {
        return Err(ServiceError::conflict(NAME_TAKEN));
    }

    let mut am: dish::ActiveModel = existing.into();
    am.category_id = Set(target.id);
    am.name = Set(c.name);
    am.description = Set(non_empty(input.description));
    am.price = Set(c.price);
    if let Some(available) = input.available {
        am.available = Set(available);
    }
    if let Some(url) = input.imgurl {
        am.imgurl = Set(url);
    }
    am.updated_at = Set(Utc::now());
    let updated = am.update(db).await?;
    info!("dish_updated");
    Ok(view(updated, &target))
}

#[instrument(skip(db), fields(dish_id = %id))]
pub async fn delete_dish(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    dish::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Dish"))?;
    let ordered = order_item::Entity::find()
        .filter(order_item::Column::DishId.eq(id))
        .one(db)
        .await?
        .is_some();
    if ordered {
        return Err(ServiceError::conflict("Cannot delete dish with existing order items"));
    }
    dish::Entity::delete_by_id(id).exec(db).await?;
    info!("dish_deleted");
    Ok(())
}
