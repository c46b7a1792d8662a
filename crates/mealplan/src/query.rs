use std::sync::Arc;

use recipebox_recipe::Recipe;
use recipebox_shared::{Id, Result, mealplan::TimeSlot};
use serde::Serialize;
use sqlx::SqlitePool;
use time::Date;

use crate::{
    MealPlanEntry, MealPlanRepository, MemoryMealPlanRepository, SqliteMealPlanRepository,
    calendar::MonthCursor, model::decode_rows,
};

/// A calendar entry with the recipe it schedules, when that recipe still exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledMeal {
    #[serde(flatten)]
    pub entry: MealPlanEntry,
    pub recipe: Option<Recipe>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    #[serde(with = "recipebox_shared::iso_date")]
    pub date: Date,
    pub in_month: bool,
    pub meals: Vec<ScheduledMeal>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarMonth {
    #[serde(flatten)]
    pub cursor: MonthCursor,
    pub previous: MonthCursor,
    pub next: MonthCursor,
    pub days: Vec<CalendarDay>,
}

#[derive(Clone)]
pub struct Query {
    meal_plans: Arc<dyn MealPlanRepository>,
    recipes: recipebox_recipe::Query,
}

impl Query {
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

    pub fn with_fixtures() -> Result<Self> {
        Ok(Self::new(
            Arc::new(MemoryMealPlanRepository::with_fixtures()?),
            recipebox_recipe::Query::with_fixtures()?,
        ))
    }

    pub async fn list(&self) -> Result<Vec<MealPlanEntry>> {
        Ok(decode_rows(self.meal_plans.list().await?))
    }

    /// Entries dated within `start..=end`.
    pub async fn by_date_range(&self, start: Date, end: Date) -> Result<Vec<MealPlanEntry>> {
        if end < start {
            recipebox_shared::user!("end date is before start date");
        }

        Ok(decode_rows(self.meal_plans.list_between(start, end).await?))
    }

    pub async fn get(&self, id: Id) -> Result<MealPlanEntry> {
        match self.meal_plans.find(id).await? {
            Some(row) => MealPlanEntry::try_from(row),
            None => recipebox_shared::not_found!("meal plan {id}"),
        }
    }

    /// Entries of one (date, slot) cell in insertion order.
    pub async fn cell(&self, date: Date, time_slot: TimeSlot) -> Result<Vec<MealPlanEntry>> {
        let entries = self.by_date_range(date, date).await?;

        Ok(entries
            .into_iter()
            .filter(|e| e.time_slot == time_slot)
            .collect())
    }

    /// The 42-day grid of a month with each day's meals, ordered by time slot.
    pub async fn calendar(&self, cursor: MonthCursor) -> Result<CalendarMonth> {
        let grid = cursor.grid()?;
        let (Some(first), Some(last)) = (grid.first().copied(), grid.last().copied()) else {
            recipebox_shared::bail!("calendar grid is empty");
        };

        let entries = self.by_date_range(first, last).await?;
        let recipes = self.recipes.list().await?;

        let days = grid
            .into_iter()
            .map(|date| {
                let mut meals: Vec<ScheduledMeal> = entries
                    .iter()
                    .filter(|e| e.date == date)
                    .map(|entry| ScheduledMeal {
                        entry: entry.clone(),
                        recipe: recipes.iter().find(|r| r.id == entry.recipe_id).cloned(),
                    })
                    .collect();
                meals.sort_by_key(|m| m.entry.time_slot);

                CalendarDay {
                    date,
                    in_month: cursor.contains(date),
                    meals,
                }
            })
            .collect();

        Ok(CalendarMonth {
            cursor,
            previous: cursor.previous(),
            next: cursor.next(),
            days,
        })
    }
}
