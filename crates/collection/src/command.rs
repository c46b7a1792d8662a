use std::sync::Arc;

use recipebox_recipe::Recipe;
use recipebox_shared::{Id, Result};
use serde::Serialize;
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    Folder, FolderRepository, FolderRow, MemoryFolderRepository, MemorySavedRecipeRepository,
    NewFolder, RenameFolder, SavedRecipe, SavedRecipeRepository, SavedRecipeRow,
    SqliteFolderRepository, SqliteSavedRecipeRepository,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleSave {
    pub saved: bool,
    pub saved_recipe: Option<SavedRecipe>,
}

#[derive(Clone)]
pub struct Command {
    saved: Arc<dyn SavedRecipeRepository>,
    folders: Arc<dyn FolderRepository>,
}

impl Command {
    pub fn new(saved: Arc<dyn SavedRecipeRepository>, folders: Arc<dyn FolderRepository>) -> Self {
        Self { saved, folders }
    }

    pub fn sqlite(pool: SqlitePool) -> Self {
        Self::new(
            Arc::new(SqliteSavedRecipeRepository(pool.clone())),
            Arc::new(SqliteFolderRepository(pool)),
        )
    }

    pub fn memory() -> Self {
        let saved = MemorySavedRecipeRepository::default();
        let folders = MemoryFolderRepository::new(vec![], &saved);

        Self::new(Arc::new(saved), Arc::new(folders))
    }

    async fn load_folder(&self, id: Id) -> Result<FolderRow> {
        match self.folders.find(id).await? {
            Some(row) => Ok(row),
            None => recipebox_shared::not_found!("folder {id}"),
        }
    }

    /// Unsaves the recipe when a save exists, otherwise saves it at the root.
    pub async fn toggle_save(&self, recipe: &Recipe) -> Result<ToggleSave> {
        if let Some(existing) = self.saved.find_by_recipe(recipe.id).await? {
            self.saved.delete(existing.id).await?;
            tracing::info!(recipe_id = recipe.id, "recipe unsaved");

            return Ok(ToggleSave {
                saved: false,
                saved_recipe: None,
            });
        }

        let row = SavedRecipeRow::from_recipe(recipe, recipebox_shared::now_timestamp());
        let row = self.saved.create(row).await?;
        tracing::info!(recipe_id = recipe.id, saved_id = row.id, "recipe saved");

        Ok(ToggleSave {
            saved: true,
            saved_recipe: Some(row.into()),
        })
    }

    /// Files a saved recipe into a folder, or back to the root with `None`.
    pub async fn move_to_folder(&self, saved_id: Id, folder_id: Option<Id>) -> Result<SavedRecipe> {
        if let Some(folder_id) = folder_id {
            self.load_folder(folder_id).await?;
        }

        self.saved.set_folder(saved_id, folder_id).await?;

        match self.saved.find(saved_id).await? {
            Some(row) => Ok(row.into()),
            None => recipebox_shared::not_found!("saved recipe {saved_id}"),
        }
    }

    pub async fn unsave(&self, saved_id: Id) -> Result<()> {
        self.saved.delete(saved_id).await
    }

    /// Creates a folder. Nesting is one level deep: a parent must be a root folder.
    pub async fn create_folder(&self, input: NewFolder) -> Result<Folder> {
        input.validate()?;

        if let Some(parent_id) = input.parent_id {
            let parent = self.load_folder(parent_id).await?;
            if parent.parent_id.is_some() {
                recipebox_shared::user!("folders can only be nested one level deep");
            }
        }

        let row = FolderRow {
            id: 0,
            name: input.name.trim().to_owned(),
            parent_id: input.parent_id,
            created_at: recipebox_shared::now_timestamp(),
        };
        let row = self.folders.create(row).await?;
        tracing::info!(folder_id = row.id, "folder created");

        Ok(row.into())
    }

    pub async fn rename_folder(&self, id: Id, input: RenameFolder) -> Result<Folder> {
        input.validate()?;

        self.folders.rename(id, input.name.trim().to_owned()).await?;

        Ok(self.load_folder(id).await?.into())
    }

    /// Moves the folder's saved recipes and child folders to the root, then
    /// removes it. Recipes themselves are untouched.
    pub async fn delete_folder(&self, id: Id) -> Result<()> {
        let moved = self.folders.delete(id).await?;
        tracing::info!(folder_id = id, moved, "folder deleted");

        Ok(())
    }
}
