//! Restaurant accounts and their public catalog views.
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use models::validate::{is_valid_email, is_valid_latitude, is_valid_longitude, is_valid_ranking};
use models::{booking, category, dining_table, dish, order, restaurant, RestaurantStatus};

use super::ensure_restaurant;
use crate::auth::password::hash_password;
use crate::errors::ServiceError;
use crate::images::{ImageStore, BACKGROUND_FOLDER, LOGO_FOLDER};
use crate::util::{any_present, non_empty};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRestaurantInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub cuisine: Option<String>,
    pub description: Option<String>,
    pub logo: Option<String>,
    pub bg_image: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub ranking: Option<f64>,
}

/// Partial update. `logo` and `bgImage` go through the image store before they are stored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRestaurantInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub cuisine: Option<String>,
    pub description: Option<String>,
    pub capacity: Option<i64>,
    pub logo: Option<String>,
    pub bg_image: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub ranking: Option<f64>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MenuCategory {
    #[serde(flatten)]
    pub category: category::Model,
    pub dishes: Vec<dish::Model>,
}

/// Restaurant with its tables and every category's dishes.
#[derive(Debug, Clone, Serialize)]
pub struct RestaurantMenu {
    #[serde(flatten)]
    pub restaurant: restaurant::Model,
    pub tables: Vec<dining_table::Model>,
    pub categories: Vec<MenuCategory>,
}

fn check_location(latitude: Option<f64>, longitude: Option<f64>, ranking: Option<f64>) -> Result<(), ServiceError> {
    if latitude.is_some_and(|v| !is_valid_latitude(v)) {
        return Err(ServiceError::validation("Invalid latitude value"));
    }
    if longitude.is_some_and(|v| !is_valid_longitude(v)) {
        return Err(ServiceError::validation("Invalid longitude value"));
    }
    if ranking.is_some_and(|v| !is_valid_ranking(v)) {
        return Err(ServiceError::validation("Ranking must be between 0.0 and 5.0"));
    }
    Ok(())
}

async fn email_owner(db: &DatabaseConnection, email: &str) -> Result<Option<restaurant::Model>, ServiceError> {
    Ok(restaurant::Entity::find()
        .filter(restaurant::Column::Email.eq(email))
        .one(db)
        .await?)
}

/// Register a restaurant. New accounts start `DE_ACTIVE` until an admin activates them.
#[instrument(skip(db, input), fields(email = ?input.email))]
pub async fn create_restaurant(db: &DatabaseConnection, input: CreateRestaurantInput) -> Result<restaurant::Model, ServiceError> {
    let (Some(name), Some(email), Some(password), Some(phone), Some(address), Some(latitude), Some(longitude)) = (
        non_empty(input.name),
        non_empty(input.email),
        non_empty(input.password),
        non_empty(input.phone),
        non_empty(input.address),
        input.latitude,
        input.longitude,
    ) else {
        return Err(ServiceError::validation(
            "Name, email, password, phone, address, latitude, and longitude are required",
        ));
    };
    if !is_valid_email(&email) {
        return Err(ServiceError::validation("Invalid email format"));
    }
    check_location(Some(latitude), Some(longitude), input.ranking)?;
    if email_owner(db, &email).await?.is_some() {
        return Err(ServiceError::conflict("Restaurant with this email already exists"));
    }

    let now = Utc::now();
    let created = restaurant::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        email: Set(email),
        password_hash: Set(hash_password(&password)?),
        phone: Set(phone),
        address: Set(address),
        city: Set(input.city.unwrap_or_default()),
        cuisine: Set(input.cuisine.unwrap_or_default()),
        description: Set(input.description.unwrap_or_default()),
        logo: Set(input.logo.unwrap_or_default()),
        bg_image: Set(input.bg_image.unwrap_or_default()),
        latitude: Set(latitude),
        longitude: Set(longitude),
        ranking: Set(input.ranking.unwrap_or(0.0)),
        capacity: Set(None),
        status: Set(RestaurantStatus::DeActive),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await?;
    info!(restaurant_id = %created.id, "restaurant_created");
    Ok(created)
}

pub async fn list_restaurants(db: &DatabaseConnection) -> Result<Vec<restaurant::Model>, ServiceError> {
    Ok(restaurant::Entity::find()
        .order_by_asc(restaurant::Column::CreatedAt)
        .all(db)
        .await?)
}

pub async fn get_restaurant(db: &DatabaseConnection, id: Uuid) -> Result<restaurant::Model, ServiceError> {
    ensure_restaurant(db, id).await
}

pub async fn get_menu(db: &DatabaseConnection, id: Uuid) -> Result<RestaurantMenu, ServiceError> {
    let r = ensure_restaurant(db, id).await?;
    let tables = r
        .find_related(dining_table::Entity)
        .order_by_asc(dining_table::Column::TableNumber)
        .all(db)
        .await?;
    let categories = r
        .find_related(category::Entity)
        .order_by_asc(category::Column::Name)
        .find_with_related(dish::Entity)
        .all(db)
        .await?
        .into_iter()
        .map(|(category, dishes)| MenuCategory { category, dishes })
        .collect();
    Ok(RestaurantMenu { restaurant: r, tables, categories })
}

#[instrument(skip(db, images, input), fields(restaurant_id = %id))]
pub async fn update_restaurant(
    db: &DatabaseConnection,
    images: &dyn ImageStore,
    id: Uuid,
    input: UpdateRestaurantInput,
) -> Result<restaurant::Model, ServiceError> {
    let name = non_empty(input.name);
    let email = non_empty(input.email);
    let password = non_empty(input.password);
    let phone = non_empty(input.phone);
    let city = non_empty(input.city);
    let address = non_empty(input.address);
    let cuisine = non_empty(input.cuisine);
    let description = non_empty(input.description);
    let capacity = input.capacity.filter(|c| *c != 0);
    let logo = non_empty(input.logo);
    let bg_image = non_empty(input.bg_image);
    let status = non_empty(input.status);
    if !any_present(&[
        name.is_some(),
        email.is_some(),
        password.is_some(),
        phone.is_some(),
        city.is_some(),
        address.is_some(),
        cuisine.is_some(),
        description.is_some(),
        capacity.is_some(),
        logo.is_some(),
        bg_image.is_some(),
        input.latitude.is_some(),
        input.longitude.is_some(),
        input.ranking.is_some(),
        status.is_some(),
    ]) {
        return Err(ServiceError::validation("At least one field must be provided for update"));
    }
    check_location(input.latitude, input.longitude, input.ranking)?;
    let status = status.map(|s| s.parse::<RestaurantStatus>()).transpose()?;
    let capacity = capacity
        .map(|c| i32::try_from(c).ok().filter(|c| *c > 0).ok_or_else(|| ServiceError::validation("Capacity must be a positive number")))
        .transpose()?;

    let existing = ensure_restaurant(db, id).await?;
    let mut am: restaurant::ActiveModel = existing.into();
    if let Some(email) = email {
        if !is_valid_email(&email) {
            return Err(ServiceError::validation("Invalid email format"));
        }
        if email_owner(db, &email).await?.is_some_and(|r| r.id != id) {
            return Err(ServiceError::conflict("Email already exists"));
        }
        am.email = Set(email);
    }
    if let Some(v) = name {
        am.name = Set(v);
    }
    if let Some(v) = password {
        am.password_hash = Set(hash_password(&v)?);
    }
    if let Some(v) = phone {
        am.phone = Set(v);
    }
    if let Some(v) = city {
        am.city = Set(v);
    }
    if let Some(v) = address {
        am.address = Set(v);
    }
    if let Some(v) = cuisine {
        am.cuisine = Set(v);
    }
    if let Some(v) = description {
        am.description = Set(v);
    }
    if let Some(v) = capacity {
        am.capacity = Set(Some(v));
    }
    if let Some(v) = input.latitude {
        am.latitude = Set(v);
    }
    if let Some(v) = input.longitude {
        am.longitude = Set(v);
    }
    if let Some(v) = input.ranking {
        am.ranking = Set(v);
    }
    if let Some(v) = status {
        am.status = Set(v);
    }
    if let Some(raw) = logo {
        am.logo = Set(images.save(&raw, LOGO_FOLDER).await?);
    }
    if let Some(raw) = bg_image {
        am.bg_image = Set(images.save(&raw, BACKGROUND_FOLDER).await?);
    }
    am.updated_at = Set(Utc::now());
    let updated = am.update(db).await?;
    info!(status = ?updated.status, "restaurant_updated");
    Ok(updated)
}

/// Remove a restaurant with its tables, categories, dishes and parking slots.
/// Refused while any booking or order still references it.
#[instrument(skip(db), fields(restaurant_id = %id))]
pub async fn delete_restaurant(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    ensure_restaurant(db, id).await?;
    let booked = booking::Entity::find()
        .filter(booking::Column::RestaurantId.eq(id))
        .one(db)
        .await?
        .is_some();
    let ordered = order::Entity::find()
        .filter(order::Column::RestaurantId.eq(id))
        .one(db)
        .await?
        .is_some();
    if booked || ordered {
        return Err(ServiceError::conflict("Cannot delete restaurant with existing bookings or orders"));
    }
    let category_ids: Vec<Uuid> = category::Entity::find()
        .filter(category::Column::RestaurantId.eq(id))
        .all(db)
        .await?
        .into_iter()
        .map(|c| c.id)
        .collect();

    let txn = db.begin().await?;
    // Dishes restrict category deletion, so they go first.
    dish::Entity::delete_many()
        .filter(dish::Column::CategoryId.is_in(category_ids))
        .exec(&txn)
        .await?;
    restaurant::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;
    info!("restaurant_deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use sea_orm::PaginatorTrait;

    use crate::test_support::{self, get_db};

    /// Records nothing; hands back a fixed CDN path per folder.
    struct FakeImages;

    #[async_trait]
    impl ImageStore for FakeImages {
        async fn save(&self, _image: &str, folder: &str) -> Result<String, ServiceError> {
            Ok(format!("https://cdn.test{folder}/img.png"))
        }
    }

    fn signup(email: &str) -> CreateRestaurantInput {
        CreateRestaurantInput {
            name: Some("Bundu Khan".into()),
            email: Some(email.into()),
            password: Some("s3cret-pass".into()),
            phone: Some("042-111".into()),
            address: Some("Liberty".into()),
            latitude: Some(31.5),
            longitude: Some(74.3),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_applies_defaults_and_rejects_duplicates() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let r = create_restaurant(&db, signup("bk@food.pk")).await?;
        assert_eq!(r.status, RestaurantStatus::DeActive);
        assert_eq!(r.ranking, 0.0);
        assert_eq!(r.city, "");
        assert_ne!(r.password_hash, "s3cret-pass");
        assert!(serde_json::to_value(&r)?.get("passwordHash").is_none());

        let dup = create_restaurant(&db, signup("bk@food.pk")).await.unwrap_err();
        assert!(matches!(dup, ServiceError::Conflict(_)));

        let mut bad = signup("x@food.pk");
        bad.latitude = Some(91.0);
        assert_eq!(create_restaurant(&db, bad).await.unwrap_err().to_string(), "Invalid latitude value");

        let mut bad = signup("y@food.pk");
        bad.ranking = Some(5.5);
        assert_eq!(
            create_restaurant(&db, bad).await.unwrap_err().to_string(),
            "Ranking must be between 0.0 and 5.0"
        );

        let mut missing = signup("z@food.pk");
        missing.longitude = None;
        assert!(matches!(create_restaurant(&db, missing).await, Err(ServiceError::Validation(_))));
        assert_eq!(list_restaurants(&db).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn update_routes_images_and_guards_email() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let a = create_restaurant(&db, signup("a@food.pk")).await?;
        create_restaurant(&db, signup("b@food.pk")).await?;

        let empty = update_restaurant(&db, &FakeImages, a.id, UpdateRestaurantInput::default()).await;
        assert!(matches!(empty, Err(ServiceError::Validation(_))));

        let taken = UpdateRestaurantInput { email: Some("b@food.pk".into()), ..Default::default() };
        assert_eq!(
            update_restaurant(&db, &FakeImages, a.id, taken).await.unwrap_err().to_string(),
            "Email already exists"
        );

        let input = UpdateRestaurantInput {
            logo: Some("data:image/png;base64,AAAA".into()),
            status: Some("ACTIVE".into()),
            capacity: Some(80),
            ..Default::default()
        };
        let updated = update_restaurant(&db, &FakeImages, a.id, input).await?;
        assert_eq!(updated.logo, "https://cdn.test/logos/img.png");
        assert_eq!(updated.status, RestaurantStatus::Active);
        assert_eq!(updated.capacity, Some(80));
        assert_eq!(updated.email, "a@food.pk");

        let bad = UpdateRestaurantInput { status: Some("OPEN".into()), ..Default::default() };
        assert!(matches!(update_restaurant(&db, &FakeImages, a.id, bad).await, Err(ServiceError::Model(_))));
        Ok(())
    }

    #[tokio::test]
    async fn menu_nests_dishes_under_categories() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let r = test_support::restaurant(&db, "Monal").await?;
        test_support::table(&db, r.id, "T1").await?;
        let bbq = test_support::category(&db, r.id, "BBQ").await?;
        test_support::category(&db, r.id, "Drinks").await?;
        test_support::dish(&db, bbq.id, "Malai Boti", 1200.0).await?;

        let menu = get_menu(&db, r.id).await?;
        assert_eq!(menu.tables.len(), 1);
        assert_eq!(menu.categories.len(), 2);
        assert_eq!(menu.categories[0].category.name, "BBQ");
        assert_eq!(menu.categories[0].dishes.len(), 1);
        assert!(menu.categories[1].dishes.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn delete_cascades_catalog_but_not_bookings() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let r = test_support::restaurant(&db, "Monal").await?;
        test_support::table(&db, r.id, "T1").await?;
        let c = test_support::category(&db, r.id, "BBQ").await?;
        test_support::dish(&db, c.id, "Malai Boti", 1200.0).await?;

        delete_restaurant(&db, r.id).await?;
        assert_eq!(dish::Entity::find().count(&db).await?, 0);
        assert_eq!(dining_table::Entity::find().count(&db).await?, 0);

        let busy = test_support::restaurant(&db, "Busy").await?;
        let t = test_support::table(&db, busy.id, "T1").await?;
        crate::booking::create_booking(
            &db,
            crate::booking::domain::CreateBookingInput {
                restaurant_id: Some(busy.id),
                table_id: Some(t.id),
                customer_name: Some("Sara".into()),
                customer_email: Some("sara@mail.com".into()),
                booking_date: Some(test_support::future_at(2, 20, 0)),
                status: Some("CONFIRMED".into()),
                ..Default::default()
            },
        )
        .await?;
        assert!(matches!(delete_restaurant(&db, busy.id).await, Err(ServiceError::Conflict(_))));
        Ok(())
    }
}
