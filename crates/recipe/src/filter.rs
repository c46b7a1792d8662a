//! Facet and free-text filtering over an in-memory recipe list.
//!
//! Categories combine with AND, values inside a category with OR. An empty
//! category places no constraint. Input order is preserved.

use recipebox_shared::recipe::{DietaryRestriction, Difficulty, MealType};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

use crate::Recipe;

/// Total-time buckets over `prep_time + cook_time` minutes.
#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
pub enum CookingTime {
    #[strum(to_string = "0-30")]
    #[serde(rename = "0-30")]
    UpTo30,
    #[strum(to_string = "30-60")]
    #[serde(rename = "30-60")]
    UpTo60,
    #[strum(to_string = "60-120")]
    #[serde(rename = "60-120")]
    UpTo120,
    #[strum(to_string = "120+")]
    #[serde(rename = "120+")]
    Over120,
}

impl CookingTime {
    pub fn contains(&self, minutes: u32) -> bool {
        match self {
            CookingTime::UpTo30 => minutes <= 30,
            CookingTime::UpTo60 => minutes > 30 && minutes <= 60,
            CookingTime::UpTo120 => minutes > 60 && minutes <= 120,
            CookingTime::Over120 => minutes > 120,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeFilter {
    #[serde(default)]
    pub meal_type: Vec<MealType>,
    #[serde(default)]
    pub dietary_restrictions: Vec<DietaryRestriction>,
    #[serde(default)]
    pub difficulty: Vec<Difficulty>,
    #[serde(default)]
    pub cooking_time: Vec<CookingTime>,
}

impl RecipeFilter {
    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }

    /// Number of selected values across all categories.
    pub fn active_count(&self) -> usize {
        self.meal_type.len()
            + self.dietary_restrictions.len()
            + self.difficulty.len()
            + self.cooking_time.len()
    }

    pub fn matches(&self, recipe: &Recipe) -> bool {
        if !self.meal_type.is_empty()
            && !recipe.meal_type.iter().any(|m| self.meal_type.contains(m))
        {
            return false;
        }

        if !self.dietary_restrictions.is_empty()
            && !recipe
                .dietary_restrictions
                .iter()
                .any(|d| self.dietary_restrictions.contains(d))
        {
            return false;
        }

        if !self.difficulty.is_empty() && !self.difficulty.contains(&recipe.difficulty) {
            return false;
        }

        if !self.cooking_time.is_empty() {
            let total = recipe.total_time();
            if !self.cooking_time.iter().any(|b| b.contains(total)) {
                return false;
            }
        }

        true
    }
}

/// Case-insensitive match of `term` against title, description or any ingredient name.
pub fn matches_term(recipe: &Recipe, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }

    recipe.title.to_lowercase().contains(&term)
        || recipe.description.to_lowercase().contains(&term)
        || recipe
            .ingredients
            .iter()
            .any(|i| i.name.to_lowercase().contains(&term))
}

pub fn filter(recipes: Vec<Recipe>, term: &str, filter: &RecipeFilter) -> Vec<Recipe> {
    recipes
        .into_iter()
        .filter(|r| matches_term(r, term) && filter.matches(r))
        .collect()
}

/// Title/description search used by the saved-recipe and folder views.
pub fn matches_title_or_description(title: &str, description: &str, term: &str) -> bool {
    let term = term.trim().to_lowercase();

    term.is_empty()
        || title.to_lowercase().contains(&term)
        || description.to_lowercase().contains(&term)
}
