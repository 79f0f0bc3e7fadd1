use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One performed set. Sets are append-only: they are created by the CSV
/// import and never updated or deleted afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Set {
    pub id: i64,
    pub workout_id: i64,
    pub exercise_id: i64,
    pub set_order: i32,
    pub weight_kg: f64,
    pub reps: i32,
    pub rpe: Option<f64>,
    pub set_type: String,
    pub notes: String,
}

/// A set joined with the title of its exercise, as returned by the
/// workout-detail endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WorkoutSet {
    pub id: i64,
    pub workout_id: i64,
    pub exercise_id: i64,
    pub set_order: i32,
    pub weight_kg: f64,
    pub reps: i32,
    pub rpe: Option<f64>,
    pub set_type: String,
    pub notes: String,
    pub exercise_name: String,
}
