use crate::domain::model::Restaurant;
use crate::transport::http::handlers::common::{require_places, required};
use crate::transport::http::types::{
    query_400, ApiError, AppState, PlaceSearchQuery, RegionQuery, RestaurantsResponse,
};
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

/// Listing endpoint polled by the search controller: a bare JSON array, possibly empty.
#[utoipa::path(
    get,
    path = "/restaurants",
    params(RegionQuery),
    responses(
        (status = 200, description = "Restaurants for the region (may be empty)", body = [Restaurant]),
        (status = 400, description = "region missing", body = ApiError),
        (status = 500, description = "Place search not configured", body = ApiError),
        (status = 502, description = "Place search provider failed", body = ApiError)
    )
)]
pub async fn list_restaurants_handler(
    State(state): State<AppState>,
    query: Result<Query<RegionQuery>, QueryRejection>,
) -> impl IntoResponse {
    let Query(query) = match query {
        Ok(q) => q,
        Err(e) => return query_400(e).into_response(),
    };
    let region = match required(query.region, "region") {
        Ok(r) => r,
        Err(e) => return e.into_response(),
    };
    let places = match require_places(&state) {
        Ok(p) => p,
        Err(resp) => return resp.into_response(),
    };

    match places.search(&region, None).await {
        Ok(restaurants) => (StatusCode::OK, Json(restaurants)).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/restaurants/search",
    params(PlaceSearchQuery),
    responses(
        (status = 200, description = "Normalized provider results", body = RestaurantsResponse),
        (status = 400, description = "query missing", body = ApiError),
        (status = 500, description = "Place search not configured", body = ApiError),
        (status = 502, description = "Place search provider failed", body = ApiError)
    )
)]
pub async fn search_restaurants_handler(
    State(state): State<AppState>,
    query: Result<Query<PlaceSearchQuery>, QueryRejection>,
) -> impl IntoResponse {
    let Query(query) = match query {
        Ok(q) => q,
        Err(e) => return query_400(e).into_response(),
    };
    let text = match required(query.query, "query") {
        Ok(q) => q,
        Err(e) => return e.into_response(),
    };
    let places = match require_places(&state) {
        Ok(p) => p,
        Err(resp) => return resp.into_response(),
    };

    match places.search(&text, query.category.as_deref()).await {
        Ok(restaurants) => (
            StatusCode::OK,
            Json(RestaurantsResponse {
                success: true,
                restaurants,
            }),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}
