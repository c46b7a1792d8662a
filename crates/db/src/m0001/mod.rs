mod folder_create_table;
mod grocery_item_create_table;
mod meal_plan_create_date_idx;
mod meal_plan_create_table;
mod recipe_create_table;
mod review_create_recipe_id_idx;
mod review_create_table;
mod saved_recipe_create_recipe_id_idx;
mod saved_recipe_create_table;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "main",
    "m0001",
    vec_box![],
    vec_box![
        recipe_create_table::Operation,
        review_create_table::Operation,
        review_create_recipe_id_idx::Operation,
        folder_create_table::Operation,
        saved_recipe_create_table::Operation,
        saved_recipe_create_recipe_id_idx::Operation,
        grocery_item_create_table::Operation,
        meal_plan_create_table::Operation,
        meal_plan_create_date_idx::Operation,
    ]
);
