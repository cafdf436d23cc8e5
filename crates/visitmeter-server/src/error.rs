use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level errors that map directly to HTTP responses.
///
/// The visit flow has a single failure category: anything that goes wrong
/// against the store (connection, query, count) collapses into `Internal` and
/// renders as a uniform 500. Callers always get well-formed JSON — the CORS
/// header layers in `app.rs` apply to error responses too.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let AppError::Internal(e) = self;
        tracing::error!(error = %e, "Request processing failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Failed to process request" })),
        )
            .into_response()
    }
}
