use crate::app::NewReview;
use crate::domain::error::ServiceError;
use crate::transport::http::handlers::common::required;
use crate::transport::http::types::{
    json_422, ApiError, AppState, CreateReviewRequest, LikeRequest, LikedResponse, LikesResponse,
    ReviewResponse, ReviewsResponse,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    post,
    path = "/reviews",
    request_body = CreateReviewRequest,
    responses(
        (status = 200, description = "Review stored", body = ReviewResponse),
        (status = 400, description = "Missing or invalid field", body = ApiError),
        (status = 422, description = "Malformed JSON body", body = ApiError),
        (status = 500, description = "Storage failure", body = ApiError)
    )
)]
pub async fn create_review_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateReviewRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match payload {
        Ok(p) => p,
        Err(e) => {
            return json_422(e, "{ restaurantId, userName, rating, comment }").into_response()
        }
    };

    let input = match to_new_review(request) {
        Ok(input) => input,
        Err(e) => return e.into_response(),
    };

    match state.reviews.create_review(input).await {
        Ok(review) => (
            StatusCode::OK,
            Json(ReviewResponse {
                success: true,
                review,
            }),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

fn to_new_review(request: CreateReviewRequest) -> Result<NewReview, ServiceError> {
    Ok(NewReview {
        restaurant_id: required(request.restaurant_id, "restaurantId")?,
        user_name: required(request.user_name, "userName")?,
        rating: request.rating.unwrap_or(0),
        comment: request.comment.unwrap_or_default(),
    })
}

#[utoipa::path(
    get,
    path = "/reviews/{id}",
    params(("id" = String, Path, description = "Restaurant id")),
    responses(
        (status = 200, description = "Reviews, newest first", body = ReviewsResponse),
        (status = 500, description = "Storage failure", body = ApiError)
    )
)]
pub async fn list_reviews_handler(
    State(state): State<AppState>,
    Path(restaurant_id): Path<String>,
) -> impl IntoResponse {
    match state.reviews.list_reviews(&restaurant_id).await {
        Ok(reviews) => (
            StatusCode::OK,
            Json(ReviewsResponse {
                success: true,
                reviews,
            }),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/reviews/{id}/like",
    request_body = LikeRequest,
    params(("id" = String, Path, description = "Review id")),
    responses(
        (status = 200, description = "Like recorded", body = LikesResponse),
        (status = 400, description = "userName missing", body = ApiError),
        (status = 404, description = "Review not found", body = ApiError),
        (status = 409, description = "Already liked", body = ApiError)
    )
)]
pub async fn like_review_handler(
    State(state): State<AppState>,
    Path(review_id): Path<String>,
    payload: Result<Json<LikeRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match payload {
        Ok(p) => p,
        Err(e) => return json_422(e, "{ userName }").into_response(),
    };
    let user_name = match required(request.user_name, "userName") {
        Ok(u) => u,
        Err(e) => return e.into_response(),
    };

    match state.reviews.like_review(&review_id, &user_name).await {
        Ok(likes) => likes_ok(likes),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/reviews/{id}/like",
    request_body = LikeRequest,
    params(("id" = String, Path, description = "Review id")),
    responses(
        (status = 200, description = "Like removed (or was never there)", body = LikesResponse),
        (status = 400, description = "userName missing", body = ApiError),
        (status = 404, description = "Review not found", body = ApiError)
    )
)]
pub async fn unlike_review_handler(
    State(state): State<AppState>,
    Path(review_id): Path<String>,
    payload: Result<Json<LikeRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match payload {
        Ok(p) => p,
        Err(e) => return json_422(e, "{ userName }").into_response(),
    };
    let user_name = match required(request.user_name, "userName") {
        Ok(u) => u,
        Err(e) => return e.into_response(),
    };

    match state.reviews.unlike_review(&review_id, &user_name).await {
        Ok(likes) => likes_ok(likes),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/reviews/{id}/liked/{user_name}",
    params(
        ("id" = String, Path, description = "Review id"),
        ("user_name" = String, Path, description = "User name")
    ),
    responses(
        (status = 200, description = "Whether the user liked the review", body = LikedResponse),
        (status = 500, description = "Storage failure", body = ApiError)
    )
)]
pub async fn has_liked_handler(
    State(state): State<AppState>,
    Path((review_id, user_name)): Path<(String, String)>,
) -> impl IntoResponse {
    match state.reviews.has_liked(&review_id, &user_name).await {
        Ok(liked) => (
            StatusCode::OK,
            Json(LikedResponse {
                success: true,
                liked,
            }),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

fn likes_ok(likes: u64) -> axum::response::Response {
    (
        StatusCode::OK,
        Json(LikesResponse {
            success: true,
            likes,
        }),
    )
        .into_response()
}
