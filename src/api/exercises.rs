use axum::extract::{Path, State};
use axum::response::Json;

use super::errors::ApiError;
use super::routes::AppState;
use crate::models::{Exercise, ExerciseAnalytics};

pub async fn list_exercises(
    State(state): State<AppState>,
) -> Result<Json<Vec<Exercise>>, ApiError> {
    let exercises = state.reporting_service.list_exercises().await?;
    Ok(Json(exercises))
}

pub async fn get_exercise_analytics(
    State(state): State<AppState>,
    Path(exercise_id): Path<i64>,
) -> Result<Json<ExerciseAnalytics>, ApiError> {
    let analytics = state
        .reporting_service
        .exercise_analytics(exercise_id)
        .await?;
    Ok(Json(analytics))
}
