/// JSON API handlers: `/api/images` and `/api/tags`
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use super::AppState;
use crate::error::Result;
use crate::manifest::{list_records, list_tags, ImageRecord};

/// Failures surfaced to API clients; details only go to the log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    Images,
    Tags,
}

impl ApiError {
    fn message(self) -> &'static str {
        match self {
            ApiError::Images => "Failed to load images",
            ApiError::Tags => "Failed to load tags",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": self.message() })),
        )
            .into_response()
    }
}

/// Run a blocking directory scan off the async workers.
/// Any failure (including a panicked scan) is logged and mapped to `error`.
async fn scan<T, F>(job: F, error: ApiError) -> std::result::Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    match tokio::task::spawn_blocking(job).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => {
            tracing::error!("❌ {}: {}", error.message(), e);
            Err(error)
        }
        Err(e) => {
            tracing::error!("❌ {}: scan task failed: {}", error.message(), e);
            Err(error)
        }
    }
}

pub async fn images(
    State(state): State<AppState>,
) -> std::result::Result<Json<Vec<ImageRecord>>, ApiError> {
    let gallery = state.gallery_path();
    let src_base = format!("/{}", state.gallery_dir);

    let records = scan(move || list_records(&gallery, &src_base), ApiError::Images).await?;
    Ok(Json(records))
}

pub async fn tags(State(state): State<AppState>) -> std::result::Result<Json<Vec<String>>, ApiError> {
    let gallery = state.gallery_path();

    let tags = scan(move || list_tags(&gallery), ApiError::Tags).await?;
    Ok(Json(tags))
}
