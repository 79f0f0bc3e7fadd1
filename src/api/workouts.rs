use axum::extract::{Path, Query, State};
use axum::response::Json;
use serde::Deserialize;

use super::errors::ApiError;
use super::routes::AppState;
use crate::models::{StatsSummary, Workout, WorkoutSet};
use crate::services::reporting_service::{parse_date_bound, HistoryFilter};

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub search: Option<String>,
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
}

pub async fn get_stats(State(state): State<AppState>) -> Result<Json<StatsSummary>, ApiError> {
    let summary = state.reporting_service.stats().await?;
    Ok(Json(summary))
}

pub async fn get_recent_workouts(
    State(state): State<AppState>,
) -> Result<Json<Vec<Workout>>, ApiError> {
    let workouts = state.reporting_service.recent().await?;
    Ok(Json(workouts))
}

pub async fn get_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<Workout>>, ApiError> {
    let filter = HistoryFilter {
        search: query.search.filter(|s| !s.trim().is_empty()),
        start_date: query.start_date.as_deref().and_then(parse_date_bound),
        end_date: query.end_date.as_deref().and_then(parse_date_bound),
    };

    let workouts = state.reporting_service.history(&filter).await?;
    Ok(Json(workouts))
}

pub async fn get_workout_detail(
    State(state): State<AppState>,
    Path(workout_id): Path<i64>,
) -> Result<Json<Vec<WorkoutSet>>, ApiError> {
    let sets = state.reporting_service.workout_detail(workout_id).await?;
    Ok(Json(sets))
}
