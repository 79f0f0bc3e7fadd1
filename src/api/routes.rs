use axum::{
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::exercises::{get_exercise_analytics, list_exercises};
use super::health::health_check;
use super::upload::upload_workout_csv;
use super::workouts::{get_history, get_recent_workouts, get_stats, get_workout_detail};
use crate::services::{ImportService, ReportingService};

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub import_service: ImportService,
    pub reporting_service: ReportingService,
}

pub fn create_routes(db: PgPool) -> Router {
    let shared_state = AppState {
        import_service: ImportService::new(db.clone()),
        reporting_service: ReportingService::new(db.clone()),
        db,
    };

    Router::new()
        .route("/health", get(health_check))
        .route("/upload", post(upload_workout_csv))
        .route("/api/stats", get(get_stats))
        .route("/api/recent", get(get_recent_workouts))
        .route("/api/history", get(get_history))
        .route("/api/history/:id", get(get_workout_detail))
        .route("/exercises", get(list_exercises))
        .route("/analytics/:exercise_id", get(get_exercise_analytics))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(shared_state)
}

/// Permissive CORS for the browser dashboard.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
