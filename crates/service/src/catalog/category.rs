use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use models::validate::is_http_url;
use models::{category, dish};

use super::{ensure_restaurant, listing_restaurant};
use crate::errors::ServiceError;
use crate::util::non_empty;

const NAME_TAKEN: &str = "Category name already exists for this restaurant";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInput {
    pub restaurant_id: Option<Uuid>,
    pub name: Option<String>,
    /// Absent keeps the stored value on update.
    pub imgurl: Option<String>,
}

fn check_imgurl(imgurl: &Option<String>) -> Result<(), ServiceError> {
    match imgurl.as_deref() {
        Some(u) if !u.is_empty() && !is_http_url(u) => Err(ServiceError::validation("imgurl must be a valid URL")),
        _ => Ok(()),
    }
}

async fn name_taken(db: &DatabaseConnection, restaurant_id: Uuid, name: &str, exclude: Option<Uuid>) -> Result<bool, ServiceError> {
    let mut q = category::Entity::find()
        .filter(category::Column::RestaurantId.eq(restaurant_id))
        .filter(category::Column::Name.eq(name));
    if let Some(id) = exclude {
        q = q.filter(category::Column::Id.ne(id));
    }
    Ok(q.one(db).await?.is_some())
}

#[instrument(skip(db, input), fields(restaurant_id = ?input.restaurant_id))]
pub async fn create_category(db: &DatabaseConnection, input: CategoryInput) -> Result<category::Model, ServiceError> {
    let (Some(restaurant_id), Some(name)) = (input.restaurant_id, non_empty(input.name)) else {
        return Err(ServiceError::validation("restaurantId and name are required"));
    };
    check_imgurl(&input.imgurl)?;
    ensure_restaurant(db, restaurant_id).await?;
    if name_taken(db, restaurant_id, &name, None).await? {
        return Err(ServiceError::conflict(NAME_TAKEN));
    }

    let now = Utc::now();
    let created = category::ActiveModel {
        id: Set(Uuid::new_v4()),
        restaurant_id: Set(restaurant_id),
        name: Set(name),
        imgurl: Set(input.imgurl.unwrap_or_default()),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await?;
    info!(category_id = %created.id, name = %created.name, "category_created");
    Ok(created)
}

pub async fn list_categories(db: &DatabaseConnection, restaurant_id: Option<Uuid>) -> Result<Vec<category::Model>, ServiceError> {
    let restaurant_id = listing_restaurant(db, restaurant_id).await?;
    Ok(category::Entity::find()
        .filter(category::Column::RestaurantId.eq(restaurant_id))
        .order_by_asc(category::Column::Name)
        .all(db)
        .await?)
}

#[instrument(skip(db, input), fields(category_id = %id))]
pub async fn update_category(db: &DatabaseConnection, id: Uuid, input: CategoryInput) -> Result<category::Model, ServiceError> {
    let restaurant_id = input.restaurant_id.ok_or_else(|| ServiceError::validation("restaurantId is required"))?;
    let name = non_empty(input.name).ok_or_else(|| ServiceError::validation("Category name is required"))?;
    check_imgurl(&input.imgurl)?;

    let existing = category::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Category"))?;
    ensure_restaurant(db, restaurant_id).await?;
    if existing.restaurant_id != restaurant_id {
        return Err(ServiceError::forbidden("Category does not belong to this restaurant"));
    }
    if name_taken(db, restaurant_id, &name, Some(id)).await? {
        return Err(ServiceError::conflict(NAME_TAKEN));
    }

    let mut am: category::ActiveModel = existing.into();
    am.name = Set(name);
    if let Some(url) = input.imgurl {
        am.imgurl = Set(url);
    }
    am.updated_at = Set(Utc::now());
    let updated = am.update(db).await?;
    info!("category_updated");
    Ok(updated)
}

#[instrument(skip(db), fields(category_id = %id))]
pub async fn delete_category(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    category::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Category"))?;
    let has_dishes = dish::Entity::find()
        .filter(dish::Column::CategoryId.eq(id))
        .one(db)
        .await?
        .is_some();
    if has_dishes {
        return Err(ServiceError::conflict("Cannot delete category with existing dishes"));
    }
    category::Entity::delete_by_id(id).exec(db).await?;
    info!("category_deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{self, get_db};

    fn input(rid: Uuid, name: &str, imgurl: Option<&str>) -> CategoryInput {
        CategoryInput { restaurant_id: Some(rid), name: Some(name.into()), imgurl: imgurl.map(Into::into) }
    }

    #[tokio::test]
    async fn names_are_unique_per_restaurant() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let a = test_support::restaurant(&db, "A").await?;
        let b = test_support::restaurant(&db, "B").await?;

        create_category(&db, input(a.id, "Drinks", None)).await?;
        create_category(&db, input(b.id, "Drinks", None)).await?;
        let dup = create_category(&db, input(a.id, "Drinks", None)).await.unwrap_err();
        assert_eq!(dup.to_string(), NAME_TAKEN);

        let bad = create_category(&db, input(a.id, "Mains", Some("ftp://x"))).await.unwrap_err();
        assert_eq!(bad.to_string(), "imgurl must be a valid URL");

        assert_eq!(list_categories(&db, Some(a.id)).await?.len(), 1);
        assert!(matches!(list_categories(&db, None).await, Err(ServiceError::Validation(_))));
        Ok(())
    }

    #[tokio::test]
    async fn update_keeps_imgurl_when_absent() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let a = test_support::restaurant(&db, "A").await?;
        let b = test_support::restaurant(&db, "B").await?;
        let c = create_category(&db, input(a.id, "Drinks", Some("https://cdn.pk/d.png"))).await?;

        let renamed = update_category(&db, c.id, input(a.id, "Beverages", None)).await?;
        assert_eq!(renamed.name, "Beverages");
        assert_eq!(renamed.imgurl, "https://cdn.pk/d.png");

        let foreign = update_category(&db, c.id, input(b.id, "X", None)).await;
        assert!(matches!(foreign, Err(ServiceError::Forbidden(_))));
        Ok(())
    }

    #[tokio::test]
    async fn delete_is_blocked_by_dishes() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let a = test_support::restaurant(&db, "A").await?;
        let c = test_support::category(&db, a.id, "Mains").await?;
        test_support::dish(&db, c.id, "Karahi", 1500.0).await?;
        let empty = test_support::category(&db, a.id, "Desserts").await?;

        let err = delete_category(&db, c.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
        delete_category(&db, empty.id).await?;
        assert!(matches!(delete_category(&db, empty.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }
}
