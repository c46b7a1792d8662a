use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use recipebox_mealplan::{
    CalendarMonth, MealPlanEntry, MealPlanPatch, NewMealPlan, calendar::MonthCursor,
};
use recipebox_shared::Id;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::routes::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct RangeParams {
    pub start: Option<String>,
    pub end: Option<String>,
}

/// GET /api/meal-plans, every entry or those within `start..=end`
pub async fn list(
    State(app): State<AppState>,
    Query(params): Query<RangeParams>,
) -> AppResult<Json<Vec<MealPlanEntry>>> {
    let entries = match (params.start.as_deref(), params.end.as_deref()) {
        (None, None) => app.mealplan_query.list().await?,
        (Some(start), Some(end)) => {
            let start = recipebox_shared::parse_date(start)?;
            let end = recipebox_shared::parse_date(end)?;
            app.mealplan_query.by_date_range(start, end).await?
        }
        _ => {
            return Err(AppError::BadRequest(
                "start and end must be given together".to_owned(),
            ));
        }
    };

    Ok(Json(entries))
}

/// POST /api/meal-plans
pub async fn schedule(
    State(app): State<AppState>,
    Json(input): Json<NewMealPlan>,
) -> AppResult<impl IntoResponse> {
    let entry = app.mealplan_command.schedule(input).await?;

    Ok((StatusCode::CREATED, Json(entry)))
}

/// PUT /api/meal-plans/{id}
pub async fn update(
    State(app): State<AppState>,
    Path(id): Path<Id>,
    Json(patch): Json<MealPlanPatch>,
) -> AppResult<Json<MealPlanEntry>> {
    Ok(Json(app.mealplan_command.update(id, patch).await?))
}

/// DELETE /api/meal-plans/{id}
pub async fn unschedule(
    State(app): State<AppState>,
    Path(id): Path<Id>,
) -> AppResult<StatusCode> {
    app.mealplan_command.unschedule(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/calendar/{year}/{month}
pub async fn calendar(
    State(app): State<AppState>,
    Path((year, month)): Path<(i32, u8)>,
) -> AppResult<Json<CalendarMonth>> {
    let cursor = MonthCursor::new(year, month)?;

    Ok(Json(app.mealplan_query.calendar(cursor).await?))
}
