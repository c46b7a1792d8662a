//! Loads the bundled sample data into an empty database.
//!
//! Stored ids are assigned by SQLite, so references between fixture rows are
//! remapped to the ids the inserts return.

use std::collections::HashMap;

use anyhow::{Result, bail};
use recipebox_collection::{
    FolderRepository, SavedRecipeRepository, SqliteFolderRepository, SqliteSavedRecipeRepository,
};
use recipebox_mealplan::{MealPlanRepository, SqliteMealPlanRepository};
use recipebox_recipe::{
    RecipeRepository, SqliteRecipeRepository,
    review::{ReviewRepository, SqliteReviewRepository},
};
use recipebox_shared::{Id, wire};
use recipebox_shopping::{GroceryRepository, SqliteGroceryRepository};
use serde::Serialize;
use sqlx::SqlitePool;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub recipes: usize,
    pub reviews: usize,
    pub folders: usize,
    pub saved_recipes: usize,
    pub grocery_items: usize,
    pub meal_plans: usize,
}

fn remap(ids: &HashMap<Id, Id>, id: Id) -> Option<Id> {
    let mapped = ids.get(&id).copied();
    if mapped.is_none() {
        tracing::warn!(id, "fixture references an unknown record");
    }

    mapped
}

/// Inserts every fixture row. Refuses to run when recipes already exist.
#[tracing::instrument(skip(pool))]
pub async fn seed(pool: &SqlitePool) -> Result<SeedReport> {
    let recipes = SqliteRecipeRepository(pool.clone());
    if !recipes.list().await?.is_empty() {
        bail!("database already holds recipes, run `reset` before seeding");
    }

    let mut report = SeedReport::default();

    let mut recipe_ids = HashMap::new();
    for row in recipebox_recipe::fixtures::recipes()? {
        let fixture_id = row.id;
        let created = recipes.create(row).await?;
        recipe_ids.insert(fixture_id, created.id);
        report.recipes += 1;
    }

    let reviews = SqliteReviewRepository(pool.clone());
    for mut row in recipebox_recipe::fixtures::reviews()? {
        let Some(recipe_id) = remap(&recipe_ids, row.recipe_id) else {
            continue;
        };
        row.recipe_id = recipe_id;
        reviews.create(row).await?;
        report.reviews += 1;
    }

    let folders = SqliteFolderRepository(pool.clone());
    let mut folder_ids = HashMap::new();
    for mut row in recipebox_collection::fixtures::folders()? {
        let fixture_id = row.id;
        row.parent_id = row.parent_id.and_then(|id| remap(&folder_ids, id));
        let created = folders.create(row).await?;
        folder_ids.insert(fixture_id, created.id);
        report.folders += 1;
    }

    let saved = SqliteSavedRecipeRepository(pool.clone());
    for mut row in recipebox_collection::fixtures::saved_recipes()? {
        let Some(recipe_id) = remap(&recipe_ids, row.recipe_id) else {
            continue;
        };
        row.recipe_id = recipe_id;
        row.folder_id = row.folder_id.and_then(|id| remap(&folder_ids, id));
        saved.create(row).await?;
        report.saved_recipes += 1;
    }

    let grocery = SqliteGroceryRepository(pool.clone());
    for mut row in recipebox_shopping::fixtures::grocery_items()? {
        let ids: Vec<Id> = wire::parse_ids(&row.recipe_ids)
            .into_iter()
            .filter_map(|id| remap(&recipe_ids, id))
            .collect();
        row.recipe_ids = wire::join_ids(&ids);
        grocery.create(row).await?;
        report.grocery_items += 1;
    }

    let meal_plans = SqliteMealPlanRepository(pool.clone());
    for mut row in recipebox_mealplan::fixtures::meal_plans()? {
        let Some(recipe_id) = remap(&recipe_ids, row.recipe_id) else {
            continue;
        };
        row.recipe_id = recipe_id;
        meal_plans.create(row).await?;
        report.meal_plans += 1;
    }

    tracing::info!(
        recipes = report.recipes,
        reviews = report.reviews,
        folders = report.folders,
        saved_recipes = report.saved_recipes,
        grocery_items = report.grocery_items,
        meal_plans = report.meal_plans,
        "fixtures loaded"
    );

    Ok(report)
}
