use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use recipebox_shared::Id;
use recipebox_shopping::{
    GroceryItem, NewGroceryItem,
    consolidate::{self, GroceryGroup, Progress},
};
use serde::Serialize;
use serde_json::json;

use crate::error::AppResult;
use crate::routes::AppState;

#[derive(Debug, Serialize)]
pub struct GroceryList {
    pub items: Vec<GroceryItem>,
    pub groups: Vec<GroceryGroup>,
    pub progress: Progress,
}

/// GET /api/grocery
pub async fn list(State(app): State<AppState>) -> AppResult<Json<GroceryList>> {
    let items = app.grocery_command.list().await?;
    let groups = consolidate::group_by_letter(&items);
    let progress = consolidate::progress(&items);

    Ok(Json(GroceryList {
        items,
        groups,
        progress,
    }))
}

/// POST /api/grocery
pub async fn add(
    State(app): State<AppState>,
    Json(input): Json<NewGroceryItem>,
) -> AppResult<impl IntoResponse> {
    let item = app.grocery_command.add_item(input).await?;

    Ok((StatusCode::CREATED, Json(item)))
}

/// POST /api/grocery/{id}/toggle
pub async fn toggle(
    State(app): State<AppState>,
    Path(id): Path<Id>,
) -> AppResult<Json<GroceryItem>> {
    Ok(Json(app.grocery_command.toggle(id).await?))
}

/// DELETE /api/grocery/{id}
pub async fn remove(State(app): State<AppState>, Path(id): Path<Id>) -> AppResult<StatusCode> {
    app.grocery_command.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/grocery/completed
pub async fn clear_completed(State(app): State<AppState>) -> AppResult<impl IntoResponse> {
    let removed = app.grocery_command.clear_completed().await?;

    Ok(Json(json!({ "removed": removed })))
}

/// DELETE /api/grocery
pub async fn clear_all(State(app): State<AppState>) -> AppResult<impl IntoResponse> {
    let removed = app.grocery_command.clear_all().await?;

    Ok(Json(json!({ "removed": removed })))
}
