/// Static file serving from the site root (index.html, images.json, gallery/...)
use std::path::{Path, PathBuf};

use axum::extract::{Path as UrlPath, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use super::AppState;

pub async fn index(State(state): State<AppState>) -> Response {
    serve(&state.site_root, "").await
}

pub async fn file(State(state): State<AppState>, UrlPath(path): UrlPath<String>) -> Response {
    serve(&state.site_root, &path).await
}

async fn serve(root: &Path, request: &str) -> Response {
    let Some(relative) = sanitize(request) else {
        return not_found();
    };

    let mut target = root.join(relative);
    let is_dir = tokio::fs::metadata(&target)
        .await
        .map(|meta| meta.is_dir())
        .unwrap_or(false);
    if is_dir {
        target.push("index.html");
    }

    match tokio::fs::read(&target).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, content_type(&target))], bytes).into_response(),
        Err(_) => not_found(),
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not Found").into_response()
}

/// Turn a decoded request path into a path relative to the site root.
/// Anything that could climb out of the root is rejected.
fn sanitize(request: &str) -> Option<PathBuf> {
    let mut relative = PathBuf::new();
    for part in request.split('/') {
        match part {
            "" | "." => continue,
            ".." => return None,
            p if p.contains('\\') || p.contains(':') => return None,
            p => relative.push(p),
        }
    }
    Some(relative)
}

fn content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "html" | "htm" => "text/html; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "js" => "text/javascript; charset=utf-8",
        "json" => "application/json",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        _ => "application/octet-stream",
    }
}
