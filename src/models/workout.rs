use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One training session, keyed by its start timestamp. Imports reuse an
/// existing row whenever a workout with the same start_time already exists.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Workout {
    pub id: i64,
    pub title: String,
    pub start_time: DateTime<Utc>,
    pub notes: String,
}

/// Dashboard summary for the stats endpoint.
///
/// `avg_per_week` is pre-rendered as a string: the raw workout count when
/// the history spans less than one week, otherwise workouts-per-week to
/// one decimal place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsSummary {
    pub workouts: i64,
    #[serde(rename = "avgPerWeek")]
    pub avg_per_week: String,
    pub heaviest: Option<f64>,
}
