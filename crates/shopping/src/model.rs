use recipebox_shared::{Id, recipe::Ingredient, wire};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroceryItem {
    #[serde(rename = "Id")]
    pub id: Id,
    pub ingredient: String,
    pub quantity: f64,
    pub unit: String,
    pub recipe_ids: Vec<Id>,
    pub checked: bool,
}

impl GroceryItem {
    /// Merge key: ingredient compared case-insensitively, unit exactly.
    pub fn same_product(&self, ingredient: &str, unit: &str) -> bool {
        self.ingredient.to_lowercase() == ingredient.to_lowercase() && self.unit == unit
    }
}

/// `grocery_item` table row.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct GroceryRow {
    #[serde(rename = "Id", default)]
    pub id: Id,
    #[serde(rename = "Name", default)]
    pub name: String,
    pub ingredient: String,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub recipe_ids: String,
    #[serde(default)]
    pub checked: String,
}

impl From<GroceryRow> for GroceryItem {
    fn from(row: GroceryRow) -> Self {
        Self {
            id: row.id,
            ingredient: row.ingredient,
            quantity: row.quantity,
            unit: row.unit,
            recipe_ids: wire::parse_ids(&row.recipe_ids),
            checked: wire::parse_flag(&row.checked),
        }
    }
}

impl From<&GroceryItem> for GroceryRow {
    fn from(item: &GroceryItem) -> Self {
        Self {
            id: item.id,
            name: format!("{} - {} {}", item.ingredient, item.quantity, item.unit),
            ingredient: item.ingredient.to_owned(),
            quantity: item.quantity,
            unit: item.unit.to_owned(),
            recipe_ids: wire::join_ids(&item.recipe_ids),
            checked: wire::format_flag(item.checked).to_owned(),
        }
    }
}

fn validate_ingredient_name(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("Ingredient is required".into()));
    }

    Ok(())
}

#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewGroceryItem {
    #[validate(custom(function = "validate_ingredient_name"))]
    pub ingredient: String,
    #[validate(range(min = 0.0, message = "Quantity cannot be negative"))]
    pub quantity: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub recipe_ids: Vec<Id>,
    #[serde(default)]
    pub checked: bool,
}

impl NewGroceryItem {
    pub fn from_ingredient(ingredient: &Ingredient, recipe_id: Id) -> Self {
        Self {
            ingredient: ingredient.name.to_owned(),
            quantity: ingredient.amount,
            unit: ingredient.unit.to_owned(),
            recipe_ids: vec![recipe_id],
            checked: false,
        }
    }

    /// `"{ingredient} - {quantity} {unit}"`
    pub fn display_name(&self) -> String {
        format!("{} - {} {}", self.ingredient, self.quantity, self.unit)
    }

    pub(crate) fn into_row(self) -> GroceryRow {
        GroceryRow {
            id: 0,
            name: self.display_name(),
            ingredient: self.ingredient,
            quantity: self.quantity,
            unit: self.unit,
            recipe_ids: wire::join_ids(&self.recipe_ids),
            checked: wire::format_flag(self.checked).to_owned(),
        }
    }

    pub(crate) fn into_item(self, id: Id) -> GroceryItem {
        GroceryItem {
            id,
            ingredient: self.ingredient,
            quantity: self.quantity,
            unit: self.unit,
            recipe_ids: self.recipe_ids,
            checked: self.checked,
        }
    }
}
