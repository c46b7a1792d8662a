use std::str::FromStr;

use recipebox_shared::{
    Id,
    recipe::{DietaryRestriction, Difficulty, Ingredient, Instruction, MealType},
    wire,
};
use serde::{Deserialize, Serialize};
use sqlx::{prelude::FromRow, types::Json};
use time::OffsetDateTime;
use validator::{Validate, ValidationError};

pub const DEFAULT_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1546554137-f86b9593a222?w=400&h=300&fit=crop";
pub const DEFAULT_CREATED_BY: &str = "user";
/// Upper bound for prep and cook minutes (one week).
pub const MAX_MINUTES: u32 = 10_080;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[serde(rename = "Id")]
    pub id: Id,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub prep_time: u32,
    pub cook_time: u32,
    pub servings: u32,
    pub difficulty: Difficulty,
    pub meal_type: Vec<MealType>,
    pub dietary_restrictions: Vec<DietaryRestriction>,
    pub rating: f64,
    pub review_count: u32,
    pub created_by: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<Instruction>,
}

impl Recipe {
    /// Preparation plus cooking minutes.
    pub fn total_time(&self) -> u32 {
        self.prep_time.saturating_add(self.cook_time)
    }
}

/// `recipe` table row, also the shape of the JSON fixtures.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct RecipeRow {
    #[serde(rename = "Id", default)]
    pub id: Id,
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub prep_time: i64,
    #[serde(default)]
    pub cook_time: i64,
    #[serde(default)]
    pub servings: i64,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub meal_type: String,
    #[serde(default)]
    pub dietary_restrictions: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review_count: i64,
    #[serde(default = "empty_json")]
    pub ingredients: Json<Vec<Ingredient>>,
    #[serde(default = "empty_json")]
    pub instructions: Json<Vec<Instruction>>,
    #[serde(default)]
    pub created_by: String,
    #[serde(default)]
    pub created_at: String,
}

fn empty_json<T>() -> Json<Vec<T>> {
    Json(Vec::new())
}

fn non_negative(value: i64) -> u32 {
    u32::try_from(value).unwrap_or(0)
}

impl From<RecipeRow> for Recipe {
    fn from(row: RecipeRow) -> Self {
        let image_url = if row.image_url.is_empty() {
            DEFAULT_IMAGE_URL.to_owned()
        } else {
            row.image_url
        };

        let created_by = if row.created_by.is_empty() {
            DEFAULT_CREATED_BY.to_owned()
        } else {
            row.created_by
        };

        let servings = match non_negative(row.servings) {
            0 => 1,
            n => n,
        };

        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            image_url,
            prep_time: non_negative(row.prep_time),
            cook_time: non_negative(row.cook_time),
            servings,
            difficulty: Difficulty::from_str(&row.difficulty).unwrap_or_default(),
            meal_type: wire::parse_list(&row.meal_type),
            dietary_restrictions: wire::parse_list(&row.dietary_restrictions),
            rating: row.rating,
            review_count: non_negative(row.review_count),
            created_by,
            created_at: recipebox_shared::timestamp_or_now(&row.created_at),
            ingredients: row.ingredients.0,
            instructions: row.instructions.0,
        }
    }
}

impl From<&Recipe> for RecipeRow {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id,
            name: recipe.title.to_owned(),
            title: recipe.title.to_owned(),
            description: recipe.description.to_owned(),
            image_url: recipe.image_url.to_owned(),
            prep_time: recipe.prep_time.into(),
            cook_time: recipe.cook_time.into(),
            servings: recipe.servings.into(),
            difficulty: recipe.difficulty.to_string(),
            meal_type: wire::join_list(&recipe.meal_type),
            dietary_restrictions: wire::join_list(&recipe.dietary_restrictions),
            rating: recipe.rating,
            review_count: recipe.review_count.into(),
            ingredients: Json(recipe.ingredients.to_vec()),
            instructions: Json(recipe.instructions.to_vec()),
            created_by: recipe.created_by.to_owned(),
            created_at: recipebox_shared::format_timestamp(recipe.created_at),
        }
    }
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("Recipe title is required".into()));
    }

    Ok(())
}

fn validate_ingredients(ingredients: &[Ingredient]) -> Result<(), ValidationError> {
    if ingredients.iter().any(|i| i.name.trim().is_empty()) {
        return Err(ValidationError::new("ingredient_name")
            .with_message("All ingredients must have a name".into()));
    }

    Ok(())
}

fn validate_instructions(instructions: &[Instruction]) -> Result<(), ValidationError> {
    if instructions.iter().any(|i| i.text.trim().is_empty()) {
        return Err(ValidationError::new("instruction_text")
            .with_message("All instructions must have text".into()));
    }

    Ok(())
}

fn default_servings() -> u32 {
    1
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewRecipe {
    #[validate(custom(function = "validate_not_blank"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    #[validate(range(max = MAX_MINUTES, message = "Prep time is too long"))]
    pub prep_time: u32,
    #[serde(default)]
    #[validate(range(max = MAX_MINUTES, message = "Cook time is too long"))]
    pub cook_time: u32,
    #[serde(default = "default_servings")]
    #[validate(range(min = 1, message = "Servings must be at least 1"))]
    pub servings: u32,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub meal_type: Vec<MealType>,
    #[serde(default)]
    pub dietary_restrictions: Vec<DietaryRestriction>,
    #[serde(default)]
    #[validate(custom(function = "validate_ingredients"))]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    #[validate(custom(function = "validate_instructions"))]
    pub instructions: Vec<Instruction>,
}

impl NewRecipe {
    pub(crate) fn into_row(self, created_at: String) -> RecipeRow {
        let image_url = self
            .image_url
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_IMAGE_URL.to_owned());

        RecipeRow {
            id: 0,
            name: self.title.to_owned(),
            title: self.title,
            description: self.description,
            image_url,
            prep_time: self.prep_time.into(),
            cook_time: self.cook_time.into(),
            servings: self.servings.into(),
            difficulty: self.difficulty.to_string(),
            meal_type: wire::join_list(&self.meal_type),
            dietary_restrictions: wire::join_list(&self.dietary_restrictions),
            rating: 0.0,
            review_count: 0,
            ingredients: Json(self.ingredients),
            instructions: Json(self.instructions),
            created_by: DEFAULT_CREATED_BY.to_owned(),
            created_at,
        }
    }
}

/// Partial update. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecipePatch {
    #[validate(custom(function = "validate_not_blank"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    #[validate(range(max = MAX_MINUTES, message = "Prep time is too long"))]
    pub prep_time: Option<u32>,
    #[validate(range(max = MAX_MINUTES, message = "Cook time is too long"))]
    pub cook_time: Option<u32>,
    #[validate(range(min = 1, message = "Servings must be at least 1"))]
    pub servings: Option<u32>,
    pub difficulty: Option<Difficulty>,
    pub meal_type: Option<Vec<MealType>>,
    pub dietary_restrictions: Option<Vec<DietaryRestriction>>,
    #[validate(custom(function = "validate_ingredients"))]
    pub ingredients: Option<Vec<Ingredient>>,
    #[validate(custom(function = "validate_instructions"))]
    pub instructions: Option<Vec<Instruction>>,
}

impl RecipePatch {
    pub(crate) fn apply(self, row: &mut RecipeRow) {
        if let Some(title) = self.title {
            row.name = title.to_owned();
            row.title = title;
        }
        if let Some(description) = self.description {
            row.description = description;
        }
        if let Some(image_url) = self.image_url {
            row.image_url = image_url;
        }
        if let Some(prep_time) = self.prep_time {
            row.prep_time = prep_time.into();
        }
        if let Some(cook_time) = self.cook_time {
            row.cook_time = cook_time.into();
        }
        if let Some(servings) = self.servings {
            row.servings = servings.into();
        }
        if let Some(difficulty) = self.difficulty {
            row.difficulty = difficulty.to_string();
        }
        if let Some(meal_type) = self.meal_type {
            row.meal_type = wire::join_list(&meal_type);
        }
        if let Some(restrictions) = self.dietary_restrictions {
            row.dietary_restrictions = wire::join_list(&restrictions);
        }
        if let Some(ingredients) = self.ingredients {
            row.ingredients = Json(ingredients);
        }
        if let Some(instructions) = self.instructions {
            row.instructions = Json(instructions);
        }
    }
}
