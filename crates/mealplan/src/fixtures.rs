use recipebox_shared::Result;

use crate::MealPlanRow;

pub fn meal_plans() -> Result<Vec<MealPlanRow>> {
    Ok(serde_json::from_str(include_str!("../fixtures/meal_plans.json"))?)
}
