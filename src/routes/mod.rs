use axum::{
    Router,
    routing::{delete, get, post, put},
};
use sqlx::SqlitePool;

mod collections;
mod grocery;
mod health;
mod meal_plans;
mod recipes;

#[derive(Clone)]
pub struct AppState {
    pub recipe_command: recipebox_recipe::Command,
    pub recipe_query: recipebox_recipe::Query,
    pub collection_command: recipebox_collection::Command,
    pub collection_query: recipebox_collection::Query,
    pub grocery_command: recipebox_shopping::Command,
    pub mealplan_command: recipebox_mealplan::Command,
    pub mealplan_query: recipebox_mealplan::Query,
    pub pool: SqlitePool,
}

impl AppState {
    pub fn sqlite(pool: SqlitePool) -> Self {
        Self {
            recipe_command: recipebox_recipe::Command::sqlite(pool.clone()),
            recipe_query: recipebox_recipe::Query::sqlite(pool.clone()),
            collection_command: recipebox_collection::Command::sqlite(pool.clone()),
            collection_query: recipebox_collection::Query::sqlite(pool.clone()),
            grocery_command: recipebox_shopping::Command::sqlite(pool.clone()),
            mealplan_command: recipebox_mealplan::Command::sqlite(pool.clone()),
            mealplan_query: recipebox_mealplan::Query::sqlite(pool.clone()),
            pool,
        }
    }
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .with_state(app_state.pool.clone())
        .route("/api/recipes", get(recipes::list).post(recipes::create))
        .route(
            "/api/recipes/{id}",
            get(recipes::detail)
                .put(recipes::update)
                .delete(recipes::remove),
        )
        .route(
            "/api/recipes/{id}/reviews",
            get(recipes::reviews).post(recipes::add_review),
        )
        .route("/api/recipes/{id}/save", post(recipes::toggle_save))
        .route("/api/recipes/{id}/grocery", post(recipes::add_to_grocery))
        .route("/api/saved", get(collections::saved))
        .route("/api/saved/{id}/folder", put(collections::move_to_folder))
        .route("/api/saved/{id}", delete(collections::unsave))
        .route(
            "/api/folders",
            get(collections::folders).post(collections::create_folder),
        )
        .route(
            "/api/folders/{id}",
            put(collections::rename_folder).delete(collections::delete_folder),
        )
        .route(
            "/api/grocery",
            get(grocery::list).post(grocery::add).delete(grocery::clear_all),
        )
        .route("/api/grocery/completed", delete(grocery::clear_completed))
        .route("/api/grocery/{id}/toggle", post(grocery::toggle))
        .route("/api/grocery/{id}", delete(grocery::remove))
        .route(
            "/api/meal-plans",
            get(meal_plans::list).post(meal_plans::schedule),
        )
        .route(
            "/api/meal-plans/{id}",
            put(meal_plans::update).delete(meal_plans::unschedule),
        )
        .route("/api/calendar/{year}/{month}", get(meal_plans::calendar))
        .with_state(app_state)
}
