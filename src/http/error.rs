//! Per-request failures and their responses.
//!
//! Clients only ever see a fixed, newline-terminated message per failure
//! kind. The underlying cause goes to the log.

use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::html::EntryError;

#[derive(Debug, Error)]
pub enum ServeError {
    #[error("404 page not found")]
    NotFound,

    #[error("invalid URL path")]
    InvalidPath,

    #[error("{0}")]
    StaticFile(#[source] std::io::Error),

    #[error(transparent)]
    Entry(#[from] EntryError),

    #[error("upstream request failed: {0}")]
    Upstream(String),

    #[error("internal server error: {0}")]
    Internal(String),
}

impl ServeError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServeError::NotFound => StatusCode::NOT_FOUND,
            ServeError::InvalidPath => StatusCode::BAD_REQUEST,
            ServeError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ServeError::StaticFile(_) | ServeError::Entry(_) | ServeError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message shown to the client, without the trailing newline.
    pub fn public_message(&self) -> String {
        match self {
            ServeError::Entry(EntryError::Scan(_)) => "failed scan for files".to_string(),
            ServeError::Entry(EntryError::ReadIndex(_)) => "failed to read index.html".to_string(),
            ServeError::Entry(EntryError::Splice(e)) => e.to_string(),
            ServeError::Upstream(_) => "upstream request failed".to_string(),
            ServeError::Internal(_) => "internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ServeError {
    fn into_response(self) -> Response {
        text_response(self.status(), format!("{}\n", self.public_message()))
    }
}

/// Plain-text response that browsers will not sniff as HTML.
pub fn text_response(status: StatusCode, body: String) -> Response {
    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    headers.insert(header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    response
}
