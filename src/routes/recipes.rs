use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::extract::Query;
use recipebox_collection::ToggleSave;
use recipebox_recipe::{
    NewRecipe, Recipe, RecipePatch,
    filter::{CookingTime, RecipeFilter},
    review::{NewReview, RatingSummary, Review},
};
use recipebox_shared::{
    Id,
    format::{format_time, pluralize, truncate_text},
    recipe::{DietaryRestriction, Difficulty, MealType},
};
use recipebox_shopping::GroceryItem;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::routes::AppState;

/// Search parameters. Facet keys may repeat: `?mealType=Lunch&mealType=Dinner`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    #[serde(default)]
    pub term: String,
    #[serde(default)]
    pub meal_type: Vec<MealType>,
    #[serde(default)]
    pub dietary_restrictions: Vec<DietaryRestriction>,
    #[serde(default)]
    pub difficulty: Vec<Difficulty>,
    #[serde(default)]
    pub cooking_time: Vec<CookingTime>,
}

impl SearchParams {
    fn into_filter(self) -> (String, RecipeFilter) {
        (
            self.term,
            RecipeFilter {
                meal_type: self.meal_type,
                dietary_restrictions: self.dietary_restrictions,
                difficulty: self.difficulty,
                cooking_time: self.cooking_time,
            },
        )
    }
}

const SUMMARY_CHARS: usize = 120;

/// Recipe as listed in search results, with card labels.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeCard {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub summary: String,
    pub total_time_label: String,
}

impl From<Recipe> for RecipeCard {
    fn from(recipe: Recipe) -> Self {
        Self {
            summary: truncate_text(&recipe.description, SUMMARY_CHARS),
            total_time_label: format_time(recipe.total_time()),
            recipe,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeList {
    pub recipes: Vec<RecipeCard>,
    pub active_filters: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDetail {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub is_saved: bool,
    pub total_time_label: String,
    /// e.g. "2 reviews"
    pub review_label: String,
}

impl RecipeDetail {
    fn new(recipe: Recipe, is_saved: bool) -> Self {
        let count = recipe.review_count;

        Self {
            total_time_label: format_time(recipe.total_time()),
            review_label: format!("{count} {}", pluralize(count as usize, "review")),
            recipe,
            is_saved,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReviewList {
    pub reviews: Vec<Review>,
    pub summary: RatingSummary,
}

/// GET /api/recipes
pub async fn list(
    State(app): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<RecipeList>> {
    let (term, selection) = params.into_filter();
    let recipes = app.recipe_query.search(&term, &selection).await?;

    Ok(Json(RecipeList {
        recipes: recipes.into_iter().map(RecipeCard::from).collect(),
        active_filters: selection.active_count(),
    }))
}

/// POST /api/recipes
pub async fn create(
    State(app): State<AppState>,
    Json(input): Json<NewRecipe>,
) -> AppResult<impl IntoResponse> {
    let recipe = app.recipe_command.create(input).await?;

    Ok((StatusCode::CREATED, Json(recipe)))
}

/// GET /api/recipes/{id}
pub async fn detail(
    State(app): State<AppState>,
    Path(id): Path<Id>,
) -> AppResult<Json<RecipeDetail>> {
    let recipe = app.recipe_query.get(id).await?;
    let is_saved = app.collection_query.is_saved(id).await?;

    Ok(Json(RecipeDetail::new(recipe, is_saved)))
}

/// PUT /api/recipes/{id}
pub async fn update(
    State(app): State<AppState>,
    Path(id): Path<Id>,
    Json(patch): Json<RecipePatch>,
) -> AppResult<Json<Recipe>> {
    Ok(Json(app.recipe_command.update(id, patch).await?))
}

/// DELETE /api/recipes/{id}
pub async fn remove(State(app): State<AppState>, Path(id): Path<Id>) -> AppResult<StatusCode> {
    app.recipe_command.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/recipes/{id}/reviews
pub async fn reviews(
    State(app): State<AppState>,
    Path(id): Path<Id>,
) -> AppResult<Json<ReviewList>> {
    app.recipe_query.get(id).await?;
    let reviews = app.recipe_query.reviews(id).await?;
    let summary = RatingSummary::of(&reviews);

    Ok(Json(ReviewList { reviews, summary }))
}

/// POST /api/recipes/{id}/reviews
pub async fn add_review(
    State(app): State<AppState>,
    Path(id): Path<Id>,
    Json(input): Json<NewReview>,
) -> AppResult<impl IntoResponse> {
    let review = app.recipe_command.add_review(id, input).await?;

    Ok((StatusCode::CREATED, Json(review)))
}

/// POST /api/recipes/{id}/save
pub async fn toggle_save(
    State(app): State<AppState>,
    Path(id): Path<Id>,
) -> AppResult<Json<ToggleSave>> {
    let recipe = app.recipe_query.get(id).await?;

    Ok(Json(app.collection_command.toggle_save(&recipe).await?))
}

/// POST /api/recipes/{id}/grocery
pub async fn add_to_grocery(
    State(app): State<AppState>,
    Path(id): Path<Id>,
) -> AppResult<Json<Vec<GroceryItem>>> {
    let recipe = app.recipe_query.get(id).await?;

    Ok(Json(app.grocery_command.add_recipe(&recipe).await?))
}
