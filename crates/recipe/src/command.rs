use std::sync::Arc;

use recipebox_shared::{Id, Result};
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    MemoryRecipeRepository, NewRecipe, Recipe, RecipePatch, RecipeRepository, RecipeRow,
    SqliteRecipeRepository,
    review::{
        MemoryReviewRepository, NewReview, RatingSummary, Review, ReviewRepository,
        SqliteReviewRepository,
    },
};

/// Write side of the recipe store.
#[derive(Clone)]
pub struct Command {
    recipes: Arc<dyn RecipeRepository>,
    reviews: Arc<dyn ReviewRepository>,
}

impl Command {
    pub fn new(recipes: Arc<dyn RecipeRepository>, reviews: Arc<dyn ReviewRepository>) -> Self {
        Self { recipes, reviews }
    }

    pub fn sqlite(pool: SqlitePool) -> Self {
        Self::new(
            Arc::new(SqliteRecipeRepository(pool.clone())),
            Arc::new(SqliteReviewRepository(pool)),
        )
    }

    pub fn memory() -> Self {
        Self::new(
            Arc::new(MemoryRecipeRepository::default()),
            Arc::new(MemoryReviewRepository::default()),
        )
    }

    async fn load(&self, id: Id) -> Result<RecipeRow> {
        match self.recipes.find(id).await? {
            Some(row) => Ok(row),
            None => recipebox_shared::not_found!("recipe {id}"),
        }
    }

    pub async fn create(&self, input: NewRecipe) -> Result<Recipe> {
        input.validate()?;

        let row = input.into_row(recipebox_shared::now_timestamp());
        let row = self.recipes.create(row).await?;
        tracing::info!(recipe_id = row.id, title = %row.title, "recipe created");

        Ok(row.into())
    }

    pub async fn update(&self, id: Id, patch: RecipePatch) -> Result<Recipe> {
        patch.validate()?;

        let mut row = self.load(id).await?;
        patch.apply(&mut row);

        Ok(self.recipes.update(row).await?.into())
    }

    pub async fn delete(&self, id: Id) -> Result<()> {
        self.recipes.delete(id).await?;
        tracing::info!(recipe_id = id, "recipe deleted");

        Ok(())
    }

    /// Stores a review and refreshes the recipe's rating and review count.
    pub async fn add_review(&self, recipe_id: Id, input: NewReview) -> Result<Review> {
        input.validate()?;

        let mut recipe = self.load(recipe_id).await?;
        let row = input.into_row(recipe_id, recipebox_shared::now_timestamp());
        let review = Review::from(self.reviews.create(row).await?);

        let reviews: Vec<Review> = self
            .reviews
            .list_by_recipe(recipe_id)
            .await?
            .into_iter()
            .map(Review::from)
            .collect();

        let summary = RatingSummary::of(&reviews);
        recipe.rating = summary.average;
        recipe.review_count = summary.count as i64;
        self.recipes.update(recipe).await?;

        Ok(review)
    }
}
