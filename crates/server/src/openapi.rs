use axum::Json;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::observability::metrics,
        crate::routes::auth::admin_login,
        crate::routes::auth::restaurant_login,
        crate::routes::auth::user_login,
        crate::routes::bookings::create,
        crate::routes::bookings::list,
        crate::routes::bookings::get,
        crate::routes::bookings::update,
        crate::routes::bookings::delete,
        crate::routes::orders::create,
        crate::routes::orders::list,
        crate::routes::orders::list_for_restaurant,
        crate::routes::orders::detail,
        crate::routes::orders::update_status,
        crate::routes::catalog::create_table,
        crate::routes::catalog::list_tables,
        crate::routes::catalog::get_table,
        crate::routes::catalog::update_table,
        crate::routes::catalog::delete_table,
        crate::routes::catalog::create_category,
        crate::routes::catalog::list_categories,
        crate::routes::catalog::update_category,
        crate::routes::catalog::delete_category,
        crate::routes::catalog::create_dish,
        crate::routes::catalog::list_dishes,
        crate::routes::catalog::update_dish,
        crate::routes::catalog::delete_dish,
        crate::routes::catalog::create_slot,
        crate::routes::catalog::list_slots,
        crate::routes::catalog::update_slot,
        crate::routes::catalog::delete_slot,
        crate::routes::restaurants::create,
        crate::routes::restaurants::list,
        crate::routes::restaurants::get,
        crate::routes::restaurants::menu,
        crate::routes::restaurants::update,
        crate::routes::restaurants::delete,
        crate::routes::accounts::create_admin,
        crate::routes::accounts::list_admins,
        crate::routes::accounts::get_admin,
        crate::routes::accounts::update_admin,
        crate::routes::accounts::delete_admin,
        crate::routes::accounts::signup,
        crate::routes::accounts::lookup_users,
        crate::routes::accounts::get_user,
        crate::routes::accounts::update_user,
        crate::routes::accounts::delete_user,
    ),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "bookings"),
        (name = "orders"),
        (name = "tables"),
        (name = "categories"),
        (name = "menus"),
        (name = "parking"),
        (name = "restaurants"),
        (name = "admin"),
        (name = "users")
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
