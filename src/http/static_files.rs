//! Direct file serving for static-extension requests.
//!
//! # Design Decisions
//! - Excluded paths are not consulted; exclusion only affects injection
//! - Any read failure is a 500 carrying the I/O error text
//! - Segments are percent-decoded one at a time, then `..` and separators
//!   are rejected before touching the filesystem

use std::path::{Path, PathBuf};

use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::Response;

use crate::http::error::ServeError;

/// Read `root + request_path` and return it with an inferred content type.
pub async fn serve_file(root: &Path, request_path: &str) -> Result<Response, ServeError> {
    let file_path = resolve(root, request_path).ok_or(ServeError::InvalidPath)?;

    let content = tokio::fs::read(&file_path)
        .await
        .map_err(ServeError::StaticFile)?;

    tracing::debug!(path = %file_path.display(), bytes = content.len(), "Serving static file");

    let mut response = Response::new(Body::from(content));
    *response.status_mut() = StatusCode::OK;
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(content_type(request_path)),
    );
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    Ok(response)
}

/// Map a URL path onto the root directory.
fn resolve(root: &Path, request_path: &str) -> Option<PathBuf> {
    let mut path = root.to_path_buf();
    for segment in request_path.split('/') {
        let segment = urlencoding::decode(segment).ok()?;
        match segment.as_ref() {
            "" | "." => {}
            ".." => return None,
            s if s.contains(['/', '\\', '\0']) => return None,
            s => path.push(s),
        }
    }
    Some(path)
}

/// Content type from the final extension of a path.
pub fn content_type(path: &str) -> &'static str {
    let extension = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("");

    match extension {
        "css" => "text/css; charset=utf-8",
        "js" | "mjs" => "text/javascript; charset=utf-8",
        "json" | "map" => "application/json",
        "html" | "htm" => "text/html; charset=utf-8",
        "txt" => "text/plain; charset=utf-8",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "wasm" => "application/wasm",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        _ => "application/octet-stream",
    }
}
