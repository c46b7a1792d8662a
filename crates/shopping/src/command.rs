use std::sync::Arc;

use recipebox_recipe::Recipe;
use recipebox_shared::{Id, Result};
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    GroceryItem, GroceryRepository, GroceryRow, MemoryGroceryRepository, NewGroceryItem,
    SqliteGroceryRepository,
    consolidate::{self, GroceryGroup, Merge, Progress},
};

#[derive(Clone)]
pub struct Command(Arc<dyn GroceryRepository>);

impl Command {
    pub fn new(repository: Arc<dyn GroceryRepository>) -> Self {
        Self(repository)
    }

    pub fn sqlite(pool: SqlitePool) -> Self {
        Self::new(Arc::new(SqliteGroceryRepository(pool)))
    }

    pub fn memory() -> Self {
        Self::new(Arc::new(MemoryGroceryRepository::default()))
    }

    pub fn with_fixtures() -> Result<Self> {
        Ok(Self::new(Arc::new(MemoryGroceryRepository::with_fixtures()?)))
    }

    pub async fn list(&self) -> Result<Vec<GroceryItem>> {
        let rows = self.0.list().await?;

        Ok(rows.into_iter().map(GroceryItem::from).collect())
    }

    pub async fn progress(&self) -> Result<Progress> {
        Ok(consolidate::progress(&self.list().await?))
    }

    pub async fn groups(&self) -> Result<Vec<GroceryGroup>> {
        Ok(consolidate::group_by_letter(&self.list().await?))
    }

    async fn store(
        &self,
        items: &mut Vec<GroceryItem>,
        input: NewGroceryItem,
    ) -> Result<GroceryItem> {
        match consolidate::merge_item(items.as_slice(), input) {
            Merge::Existing { index, item } => {
                self.0.update(GroceryRow::from(&item)).await?;
                Ok(consolidate::apply_merge(items, Merge::Existing { index, item }, 0))
            }
            Merge::New(new) => {
                let row = self.0.create(new.clone().into_row()).await?;
                Ok(consolidate::apply_merge(items, Merge::New(new), row.id))
            }
        }
    }

    /// Adds one item, merging it into an existing item for the same product.
    pub async fn add_item(&self, input: NewGroceryItem) -> Result<GroceryItem> {
        input.validate()?;

        let mut items = self.list().await?;

        self.store(&mut items, input).await
    }

    /// Adds every ingredient of `recipe`. Returns the resulting list.
    pub async fn add_recipe(&self, recipe: &Recipe) -> Result<Vec<GroceryItem>> {
        let mut items = self.list().await?;
        for ingredient in recipe.ingredients.iter().filter(|i| !i.name.trim().is_empty()) {
            let input = NewGroceryItem::from_ingredient(ingredient, recipe.id);
            self.store(&mut items, input).await?;
        }

        tracing::info!(
            recipe_id = recipe.id,
            ingredients = recipe.ingredients.len(),
            "recipe added to grocery list"
        );

        Ok(items)
    }

    pub async fn toggle(&self, id: Id) -> Result<GroceryItem> {
        let Some(row) = self.0.find(id).await? else {
            recipebox_shared::not_found!("grocery item {id}");
        };

        let mut item = GroceryItem::from(row);
        item.checked = !item.checked;
        self.0.update(GroceryRow::from(&item)).await?;

        Ok(item)
    }

    pub async fn delete(&self, id: Id) -> Result<()> {
        self.0.delete(id).await
    }

    pub async fn clear_completed(&self) -> Result<u64> {
        let removed = self.0.delete_checked().await?;
        tracing::info!(removed, "completed grocery items cleared");

        Ok(removed)
    }

    pub async fn clear_all(&self) -> Result<u64> {
        let removed = self.0.delete_all().await?;
        tracing::info!(removed, "grocery list cleared");

        Ok(removed)
    }
}
