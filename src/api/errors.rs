use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("No file uploaded.")]
    MissingFile,
    #[error("Invalid upload: {0}")]
    InvalidUpload(String),
    #[error("Import Failed")]
    ImportFailed(#[source] anyhow::Error),
    #[error("{0}")]
    Store(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::MissingFile | ApiError::InvalidUpload(_) => StatusCode::BAD_REQUEST,
            ApiError::ImportFailed(_) | ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_missing_file_is_bad_request() {
        let response = ApiError::MissingFile.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_import_failure_is_server_error() {
        let response = ApiError::ImportFailed(anyhow!("boom")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_store_error_keeps_underlying_message() {
        let err = ApiError::from(anyhow!("connection refused"));
        assert_eq!(err.to_string(), "connection refused");
    }
}
