use axum::extract::{Multipart, State};
use axum::response::Json;
use serde::Serialize;
use std::io::Write;
use tempfile::NamedTempFile;
use tracing::{error, info};

use super::errors::ApiError;
use super::routes::AppState;

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub message: String,
    #[serde(rename = "setsProcessed")]
    pub sets_processed: usize,
}

/// Accept a multipart CSV upload (field `csvFile`) and import it as one
/// transaction. On any failure nothing from the file persists.
pub async fn upload_workout_csv(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ImportResponse>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidUpload(e.to_string()))?
    {
        if field.name() != Some("csvFile") {
            continue;
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::InvalidUpload(e.to_string()))?;

        // Spool the upload to a temp file; it is unlinked on drop no matter
        // which path we leave this handler through.
        let mut spool = NamedTempFile::new().map_err(|e| ApiError::ImportFailed(e.into()))?;
        spool
            .write_all(&data)
            .map_err(|e| ApiError::ImportFailed(e.into()))?;

        let sets_processed = state
            .import_service
            .import_file(spool.path())
            .await
            .map_err(|e| {
                error!("import failed: {:#}", e);
                ApiError::ImportFailed(e)
            })?;

        info!("import succeeded: {} sets processed", sets_processed);

        return Ok(Json(ImportResponse {
            message: format!("Import Success: {} sets processed.", sets_processed),
            sets_processed,
        }));
    }

    Err(ApiError::MissingFile)
}
