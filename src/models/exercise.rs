use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A named movement, keyed by its title (case-sensitive).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Exercise {
    pub id: i64,
    pub title: String,
}

/// Per-exercise progress series: one entry per workout date, restricted to
/// working sets. The three vectors are index-aligned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseAnalytics {
    pub labels: Vec<String>,
    #[serde(rename = "weightData")]
    pub weight_data: Vec<f64>,
    #[serde(rename = "volumeData")]
    pub volume_data: Vec<f64>,
}
