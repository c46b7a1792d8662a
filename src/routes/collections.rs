use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use recipebox_collection::{
    Folder, FolderScope, FolderSummary, NewFolder, RenameFolder, SavedRecipe, SavedRecipeDetail,
};
use recipebox_shared::Id;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::routes::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedParams {
    #[serde(default)]
    pub term: String,
    /// A folder id, or `root` for saves outside any folder. Absent lists everything.
    pub folder_id: Option<String>,
}

fn parse_scope(value: Option<&str>) -> AppResult<FolderScope> {
    match value.map(str::trim) {
        None | Some("") => Ok(FolderScope::All),
        Some("root") => Ok(FolderScope::Root),
        Some(id) => id
            .parse::<Id>()
            .map(FolderScope::Folder)
            .map_err(|_| AppError::BadRequest(format!("invalid folder id '{id}'"))),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveInput {
    pub folder_id: Option<Id>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderParams {
    pub parent_id: Option<Id>,
}

#[derive(Debug, Serialize)]
pub struct FolderListing {
    pub folders: Vec<FolderSummary>,
    pub breadcrumbs: Vec<Folder>,
}

/// GET /api/saved
pub async fn saved(
    State(app): State<AppState>,
    Query(params): Query<SavedParams>,
) -> AppResult<Json<Vec<SavedRecipeDetail>>> {
    let scope = parse_scope(params.folder_id.as_deref())?;

    Ok(Json(
        app.collection_query
            .saved_recipes(&params.term, scope)
            .await?,
    ))
}

/// PUT /api/saved/{id}/folder
pub async fn move_to_folder(
    State(app): State<AppState>,
    Path(id): Path<Id>,
    Json(input): Json<MoveInput>,
) -> AppResult<Json<SavedRecipe>> {
    Ok(Json(
        app.collection_command
            .move_to_folder(id, input.folder_id)
            .await?,
    ))
}

/// DELETE /api/saved/{id}
pub async fn unsave(State(app): State<AppState>, Path(id): Path<Id>) -> AppResult<StatusCode> {
    app.collection_command.unsave(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/folders
pub async fn folders(
    State(app): State<AppState>,
    Query(params): Query<FolderParams>,
) -> AppResult<Json<FolderListing>> {
    let breadcrumbs = match params.parent_id {
        Some(id) => app.collection_query.breadcrumbs(id).await?,
        None => vec![],
    };
    let folders = app.collection_query.child_folders(params.parent_id).await?;

    Ok(Json(FolderListing {
        folders,
        breadcrumbs,
    }))
}

/// POST /api/folders
pub async fn create_folder(
    State(app): State<AppState>,
    Json(input): Json<NewFolder>,
) -> AppResult<impl IntoResponse> {
    let folder = app.collection_command.create_folder(input).await?;

    Ok((StatusCode::CREATED, Json(folder)))
}

/// PUT /api/folders/{id}
pub async fn rename_folder(
    State(app): State<AppState>,
    Path(id): Path<Id>,
    Json(input): Json<RenameFolder>,
) -> AppResult<Json<Folder>> {
    Ok(Json(app.collection_command.rename_folder(id, input).await?))
}

/// DELETE /api/folders/{id}
pub async fn delete_folder(
    State(app): State<AppState>,
    Path(id): Path<Id>,
) -> AppResult<StatusCode> {
    app.collection_command.delete_folder(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
