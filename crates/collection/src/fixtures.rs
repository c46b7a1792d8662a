use recipebox_shared::Result;

use crate::{FolderRow, SavedRecipeRow};

pub fn saved_recipes() -> Result<Vec<SavedRecipeRow>> {
    Ok(serde_json::from_str(include_str!(
        "../fixtures/saved_recipes.json"
    ))?)
}

pub fn folders() -> Result<Vec<FolderRow>> {
    Ok(serde_json::from_str(include_str!("../fixtures/folders.json"))?)
}
