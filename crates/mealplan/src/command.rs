use std::sync::Arc;

use recipebox_shared::{Id, Result};
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    MealPlanEntry, MealPlanPatch, MealPlanRepository, MealPlanRow, MemoryMealPlanRepository,
    NewMealPlan, SqliteMealPlanRepository,
};

#[derive(Clone)]
pub struct Command {
    meal_plans: Arc<dyn MealPlanRepository>,
    recipes: recipebox_recipe::Query,
}

impl Command {
    pub fn new(meal_plans: Arc<dyn MealPlanRepository>, recipes: recipebox_recipe::Query) -> Self {
        Self {
            meal_plans,
            recipes,
        }
    }

    pub fn sqlite(pool: SqlitePool) -> Self {
        Self::new(
            Arc::new(SqliteMealPlanRepository(pool.clone())),
            recipebox_recipe::Query::sqlite(pool),
        )
    }

    pub fn with_recipes(recipes: recipebox_recipe::Query) -> Self {
        Self::new(Arc::new(MemoryMealPlanRepository::default()), recipes)
    }

    async fn load(&self, id: Id) -> Result<MealPlanRow> {
        match self.meal_plans.find(id).await? {
            Some(row) => Ok(row),
            None => recipebox_shared::not_found!("meal plan {id}"),
        }
    }

    /// Schedules a recipe. A cell may hold any number of entries.
    pub async fn schedule(&self, input: NewMealPlan) -> Result<MealPlanEntry> {
        input.validate()?;
        self.recipes.get(input.recipe_id).await?;

        let row = input.into_row(recipebox_shared::now_timestamp());
        let row = self.meal_plans.create(row).await?;
        tracing::info!(
            meal_plan_id = row.id,
            recipe_id = row.recipe_id,
            date = %row.date,
            time_slot = %row.time_slot,
            "meal scheduled"
        );

        MealPlanEntry::try_from(row)
    }

    pub async fn update(&self, id: Id, patch: MealPlanPatch) -> Result<MealPlanEntry> {
        patch.validate()?;

        let mut row = self.load(id).await?;
        patch.apply(&mut row);

        MealPlanEntry::try_from(self.meal_plans.update(row).await?)
    }

    pub async fn unschedule(&self, id: Id) -> Result<()> {
        self.meal_plans.delete(id).await?;
        tracing::info!(meal_plan_id = id, "meal unscheduled");

        Ok(())
    }
}
