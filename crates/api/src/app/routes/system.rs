use axum::http::StatusCode;
use axum::response::Response;

use crate::app::errors;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// Fallback for unmatched paths, so 404s keep the envelope shape.
pub async fn unknown_route() -> Response {
    errors::envelope(StatusCode::NOT_FOUND, vec!["Not found".to_string()])
}
