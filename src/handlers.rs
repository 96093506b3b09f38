//! HTTP request handlers for the fixture server.

use axum::{
    body::Body,
    extract::{Extension, State},
    http::{HeaderValue, StatusCode, Uri, header},
    response::Response,
};
use owo_colors::OwoColorize;
use std::{
    path::{Component, Path, PathBuf},
    sync::Arc,
    time::Instant,
};
use tokio::fs;
use tracing::info;

use crate::colors::request_tag;
use crate::routes;
use crate::state::AppState;

/// Serves files from the public directory mounted under the base path
///
/// - Requests outside the base path, or climbing out of it with `..`, get 404
/// - Directory requests serve their `index.html`
/// - App routes (`/`, `/login`, `/dashboard`) serve the root `index.html` so
///   deep links survive a reload
/// - Content type follows the file extension
pub async fn serve_static(
    State(state): State<Arc<AppState>>,
    Extension(id): Extension<String>,
    Extension(start_time): Extension<Instant>,
    uri: Uri,
) -> Result<Response, StatusCode> {
    let Some(file_path) = resolve_file(&state, uri.path()) else {
        log_static(&id, start_time, StatusCode::NOT_FOUND);
        return Err(StatusCode::NOT_FOUND);
    };

    match fs::read(&file_path).await {
        Ok(content) => {
            let mime_type = mime_guess::from_path(&file_path).first_or_octet_stream();
            let mut response = Response::new(Body::from(content));
            if let Ok(value) = HeaderValue::from_str(mime_type.as_ref()) {
                response.headers_mut().insert(header::CONTENT_TYPE, value);
            }
            log_static(&id, start_time, response.status());
            Ok(response)
        }
        Err(_) => {
            log_static(&id, start_time, StatusCode::NOT_FOUND);
            Err(StatusCode::NOT_FOUND)
        }
    }
}

/// Map a request path to a file under the public directory
fn resolve_file(state: &AppState, request_path: &str) -> Option<PathBuf> {
    let rel = strip_base(&state.base_path, request_path)?.trim_start_matches('/');
    // Only plain names: no root, prefix, `.` or `..` that could leave public_dir
    if !Path::new(rel)
        .components()
        .all(|c| matches!(c, Component::Normal(_)))
    {
        return None;
    }

    let mut file_path = state.public_dir.join(rel);
    if file_path.is_dir() {
        file_path.push("index.html");
    } else if !file_path.exists() {
        let app_path = format!("/{}", rel.trim_end_matches('/'));
        if routes::find(&app_path).is_some() {
            file_path = state.public_dir.join("index.html");
        }
    }
    Some(file_path)
}

/// Path relative to the base, without a leading slash
fn strip_base<'a>(base_path: &str, request_path: &'a str) -> Option<&'a str> {
    if request_path == base_path.trim_end_matches('/') {
        return Some("");
    }
    request_path.strip_prefix(base_path)
}

fn log_static(id: &str, start_time: Instant, status: StatusCode) {
    info!(
        "{} ← {} {} ({}ms)",
        request_tag(id),
        "STATIC".green(),
        status,
        start_time.elapsed().as_millis()
    );
}
