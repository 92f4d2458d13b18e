use crate::app::ReviewService;
use crate::domain::model::{Restaurant, Review};
use crate::infra::kakao::PlaceSearch;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

#[derive(Clone)]
pub struct AppState {
    pub reviews: ReviewService,
    /// `None` when no provider key is configured; place-search routes then answer 500.
    pub places: Option<Arc<dyn PlaceSearch>>,
}

/// Error envelope shared by every endpoint.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ApiError {
    pub success: bool,
    pub error: String,
}

impl ApiError {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

#[derive(Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    /// Accepts the restaurant id as a JSON string or number.
    #[serde(default, deserialize_with = "de_opt_id")]
    #[schema(value_type = String)]
    pub restaurant_id: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    /// 1 to 5 stars. 0 or absent is rejected.
    #[serde(default)]
    pub rating: Option<i64>,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LikeRequest {
    #[serde(default)]
    pub user_name: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ReviewResponse {
    pub success: bool,
    pub review: Review,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ReviewsResponse {
    pub success: bool,
    /// Newest first, like counts recomputed on read.
    pub reviews: Vec<Review>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct LikesResponse {
    pub success: bool,
    pub likes: u64,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct LikedResponse {
    pub success: bool,
    pub liked: bool,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct RestaurantsResponse {
    pub success: bool,
    pub restaurants: Vec<Restaurant>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct HealthResponse {
    pub success: bool,
    pub status: String,
}

#[derive(Deserialize, Debug, IntoParams)]
pub struct RegionQuery {
    /// Free-text location, e.g. a neighborhood name.
    pub region: Option<String>,
}

#[derive(Deserialize, Debug, IntoParams)]
pub struct PlaceSearchQuery {
    pub query: Option<String>,
    /// Optional category appended to the query.
    pub category: Option<String>,
}

fn de_opt_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<JsonValue>::deserialize(deserializer)? {
        Some(JsonValue::String(s)) => Some(s),
        Some(JsonValue::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

pub fn json_422(err: JsonRejection, expected: &str) -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ApiError::new(format!(
            "Invalid JSON body: {} (expected: {})",
            err, expected
        ))),
    )
}

pub fn query_400(err: QueryRejection) -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiError::new(format!("Invalid query string: {}", err))),
    )
}
