// API Helper Functions
//
// Shared utilities used across API modules.

use axum::{http::StatusCode, Json};

use crate::blockcypher::FetchError;
use super::types::ApiError;

/// Standard error result type for API handlers
pub type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

/// Map a fetch failure to the fixed per-endpoint HTTP responses: 404 for
/// missing upstream data, 500 for everything else. Upstream detail is logged
/// server-side and never leaked to the caller.
pub fn map_fetch_error(
    err: FetchError,
    not_found_message: &str,
    failure_message: &str,
) -> (StatusCode, Json<ApiError>) {
    match err {
        FetchError::NotFound => (
            StatusCode::NOT_FOUND,
            Json(ApiError::new(not_found_message)),
        ),
        FetchError::Upstream(detail) => {
            tracing::error!(error = %detail, "upstream request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError::new(failure_message)),
            )
        }
    }
}
