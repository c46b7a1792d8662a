//! Sample rows bundled with the binary, used to seed a database or an
//! in-memory repository.

use recipebox_shared::Result;

use crate::{RecipeRow, review::ReviewRow};

pub fn recipes() -> Result<Vec<RecipeRow>> {
    Ok(serde_json::from_str(include_str!("../fixtures/recipes.json"))?)
}

pub fn reviews() -> Result<Vec<ReviewRow>> {
    Ok(serde_json::from_str(include_str!("../fixtures/reviews.json"))?)
}
