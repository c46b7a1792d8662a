use std::sync::Arc;

use recipebox_shared::{Id, Result};
use sqlx::SqlitePool;

use crate::{
    MemoryRecipeRepository, Recipe, RecipeRepository, SqliteRecipeRepository,
    filter::{self, RecipeFilter},
    review::{
        MemoryReviewRepository, RatingSummary, Review, ReviewRepository, SqliteReviewRepository,
    },
};

/// Read side of the recipe store.
#[derive(Clone)]
pub struct Query {
    recipes: Arc<dyn RecipeRepository>,
    reviews: Arc<dyn ReviewRepository>,
}

impl Query {
    pub fn new(recipes: Arc<dyn RecipeRepository>, reviews: Arc<dyn ReviewRepository>) -> Self {
        Self { recipes, reviews }
    }

    pub fn sqlite(pool: SqlitePool) -> Self {
        Self::new(
            Arc::new(SqliteRecipeRepository(pool.clone())),
            Arc::new(SqliteReviewRepository(pool)),
        )
    }

    pub fn with_fixtures() -> Result<Self> {
        Ok(Self::new(
            Arc::new(MemoryRecipeRepository::with_fixtures()?),
            Arc::new(MemoryReviewRepository::with_fixtures()?),
        ))
    }

    pub async fn list(&self) -> Result<Vec<Recipe>> {
        let rows = self.recipes.list().await?;

        Ok(rows.into_iter().map(Recipe::from).collect())
    }

    pub async fn search(&self, term: &str, selection: &RecipeFilter) -> Result<Vec<Recipe>> {
        let recipes = self.list().await?;

        Ok(filter::filter(recipes, term, selection))
    }

    pub async fn find(&self, id: Id) -> Result<Option<Recipe>> {
        Ok(self.recipes.find(id).await?.map(Recipe::from))
    }

    pub async fn get(&self, id: Id) -> Result<Recipe> {
        match self.find(id).await? {
            Some(recipe) => Ok(recipe),
            None => recipebox_shared::not_found!("recipe {id}"),
        }
    }

    /// Reviews of a recipe, newest first.
    pub async fn reviews(&self, recipe_id: Id) -> Result<Vec<Review>> {
        let rows = self.reviews.list_by_recipe(recipe_id).await?;

        Ok(rows.into_iter().map(Review::from).collect())
    }

    pub async fn rating_summary(&self, recipe_id: Id) -> Result<RatingSummary> {
        let reviews = self.reviews(recipe_id).await?;

        Ok(RatingSummary::of(&reviews))
    }
}
