use crate::domain::model::{Mood, PriceRange, Restaurant, Review, UserProfile};
use crate::transport::http::handlers::{health, restaurants, reviews};
use crate::transport::http::types::{
    ApiError, AppState, CreateReviewRequest, HealthResponse, LikeRequest, LikedResponse,
    LikesResponse, RestaurantsResponse, ReviewResponse, ReviewsResponse,
};
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        reviews::create_review_handler,
        reviews::list_reviews_handler,
        reviews::like_review_handler,
        reviews::unlike_review_handler,
        reviews::has_liked_handler,
        restaurants::list_restaurants_handler,
        restaurants::search_restaurants_handler
    ),
    components(schemas(
        ApiError,
        HealthResponse,
        CreateReviewRequest,
        LikeRequest,
        ReviewResponse,
        ReviewsResponse,
        LikesResponse,
        LikedResponse,
        RestaurantsResponse,
        Review,
        Restaurant,
        PriceRange,
        Mood,
        UserProfile
    ))
)]
pub struct ApiDoc;

// Review routes share the `:id` segment name; the router rejects differing names at one position.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route("/reviews", post(reviews::create_review_handler))
        .route("/reviews/:id", get(reviews::list_reviews_handler))
        .route(
            "/reviews/:id/like",
            post(reviews::like_review_handler).delete(reviews::unlike_review_handler),
        )
        .route("/reviews/:id/liked/:user_name", get(reviews::has_liked_handler))
        .route("/restaurants", get(restaurants::list_restaurants_handler))
        .route("/restaurants/search", get(restaurants::search_restaurants_handler))
        .with_state(app_state)
}
