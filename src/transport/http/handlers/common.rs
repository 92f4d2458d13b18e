use crate::domain::error::ServiceError;
use crate::infra::kakao::PlaceSearch;
use crate::transport::http::types::{ApiError, AppState};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::sync::Arc;
use tracing::error;

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if !self.is_client_error() {
            error!("Request failed: {}", self);
        }
        (status, Json(ApiError::new(self.user_message()))).into_response()
    }
}

/// Resolves the configured place-search gateway, or the 500 the endpoints answer without one.
pub fn require_places(state: &AppState) -> Result<Arc<dyn PlaceSearch>, (StatusCode, Json<ApiError>)> {
    state.places.clone().ok_or_else(|| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiError::new("Place search is not configured")),
        )
    })
}

/// Trims `value` and rejects blanks with a validation error naming `field`.
pub fn required(value: Option<String>, field: &str) -> Result<String, ServiceError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ServiceError::validation(format!("{} is required", field)))
}
