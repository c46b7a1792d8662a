use std::{collections::HashSet, sync::Arc};

use recipebox_recipe::filter;
use recipebox_shared::{Id, Result};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    Folder, FolderRepository, MemoryFolderRepository, MemorySavedRecipeRepository, SavedRecipe,
    SavedRecipeDetail, SavedRecipeRepository, SqliteFolderRepository,
    SqliteSavedRecipeRepository,
};

/// Which saved recipes a listing covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FolderScope {
    #[default]
    All,
    /// Saved recipes not filed in any folder.
    Root,
    Folder(Id),
}

impl FolderScope {
    pub fn contains(&self, saved: &SavedRecipe) -> bool {
        match self {
            FolderScope::All => true,
            FolderScope::Root => saved.folder_id.is_none(),
            FolderScope::Folder(id) => saved.folder_id == Some(*id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderSummary {
    #[serde(flatten)]
    pub folder: Folder,
    pub recipe_count: usize,
}

#[derive(Clone)]
pub struct Query {
    saved: Arc<dyn SavedRecipeRepository>,
    folders: Arc<dyn FolderRepository>,
    recipes: recipebox_recipe::Query,
}

impl Query {
    pub fn new(
        saved: Arc<dyn SavedRecipeRepository>,
        folders: Arc<dyn FolderRepository>,
        recipes: recipebox_recipe::Query,
    ) -> Self {
        Self {
            saved,
            folders,
            recipes,
        }
    }

    pub fn sqlite(pool: SqlitePool) -> Self {
        Self::new(
            Arc::new(SqliteSavedRecipeRepository(pool.clone())),
            Arc::new(SqliteFolderRepository(pool.clone())),
            recipebox_recipe::Query::sqlite(pool),
        )
    }

    pub fn with_fixtures() -> Result<Self> {
        let saved = MemorySavedRecipeRepository::with_fixtures()?;
        let folders = MemoryFolderRepository::with_fixtures(&saved)?;

        Ok(Self::new(
            Arc::new(saved),
            Arc::new(folders),
            recipebox_recipe::Query::with_fixtures()?,
        ))
    }

    pub async fn list_saved(&self) -> Result<Vec<SavedRecipe>> {
        let rows = self.saved.list().await?;

        Ok(rows.into_iter().map(SavedRecipe::from).collect())
    }

    pub async fn is_saved(&self, recipe_id: Id) -> Result<bool> {
        Ok(self.saved.find_by_recipe(recipe_id).await?.is_some())
    }

    /// Saved recipes joined with their full recipe, limited to `scope` and
    /// matched on title or description. Saves whose recipe is gone are dropped.
    pub async fn saved_recipes(
        &self,
        term: &str,
        scope: FolderScope,
    ) -> Result<Vec<SavedRecipeDetail>> {
        let saved = self.list_saved().await?;
        let recipes = self.recipes.list().await?;

        let details = saved
            .iter()
            .filter(|s| scope.contains(s))
            .filter_map(|s| {
                let recipe = recipes.iter().find(|r| r.id == s.recipe_id);
                if recipe.is_none() {
                    tracing::debug!(
                        saved_id = s.id,
                        recipe_id = s.recipe_id,
                        "saved recipe has no recipe"
                    );
                }

                recipe.map(|r| SavedRecipeDetail::new(s, r.clone()))
            })
            .filter(|d| {
                filter::matches_title_or_description(&d.recipe.title, &d.recipe.description, term)
            })
            .collect();

        Ok(details)
    }

    pub async fn folders(&self) -> Result<Vec<Folder>> {
        let rows = self.folders.list().await?;

        Ok(rows.into_iter().map(Folder::from).collect())
    }

    pub async fn get_folder(&self, id: Id) -> Result<Folder> {
        match self.folders.find(id).await? {
            Some(row) => Ok(row.into()),
            None => recipebox_shared::not_found!("folder {id}"),
        }
    }

    /// Folders directly under `parent_id` (`None` is the root) with their saved-recipe counts.
    pub async fn child_folders(&self, parent_id: Option<Id>) -> Result<Vec<FolderSummary>> {
        let saved = self.list_saved().await?;
        let folders = self.folders().await?;

        Ok(folders
            .into_iter()
            .filter(|f| f.parent_id == parent_id)
            .map(|folder| {
                let recipe_count = saved
                    .iter()
                    .filter(|s| s.folder_id == Some(folder.id))
                    .count();

                FolderSummary {
                    folder,
                    recipe_count,
                }
            })
            .collect())
    }

    /// Path from the root down to `folder_id`, inclusive.
    pub async fn breadcrumbs(&self, folder_id: Id) -> Result<Vec<Folder>> {
        let folders = self.folders().await?;
        let mut path = vec![];
        let mut visited = HashSet::new();
        let mut current = Some(folder_id);

        while let Some(id) = current {
            if !visited.insert(id) {
                break;
            }

            let Some(folder) = folders.iter().find(|f| f.id == id) else {
                if path.is_empty() {
                    recipebox_shared::not_found!("folder {id}");
                }
                break;
            };

            current = folder.parent_id;
            path.push(folder.clone());
        }

        path.reverse();

        Ok(path)
    }
}
