//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use catalog_domain::error::CatalogError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`CatalogError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError(CatalogError);

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            CatalogError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            CatalogError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            CatalogError::Conflict(err) => (StatusCode::CONFLICT, err.to_string()),
            CatalogError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
