//! HTTP client for the review endpoints.

use crate::app::session::ReviewBoard;
use crate::domain::error::ServiceError;
use crate::domain::model::Review;
use crate::transport::http::types::{
    ApiError, LikedResponse, LikesResponse, ReviewResponse, ReviewsResponse,
};
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::collections::HashSet;
use std::time::Duration;
use tracing::debug;

pub struct ReviewsClient {
    client: Client,
    base_url: Url,
}

impl ReviewsClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("{} cannot be used as a base URL", base_url);
        }
        Ok(Self { client, base_url })
    }

    /// Appends `segments` to the base URL, percent-encoding each one.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub async fn create_review(
        &self,
        restaurant_id: &str,
        user_name: &str,
        rating: u8,
        comment: &str,
    ) -> Result<Review, ServiceError> {
        let body = json!({
            "restaurantId": restaurant_id,
            "userName": user_name,
            "rating": rating,
            "comment": comment,
        });
        let response: ReviewResponse = send(self.client.post(self.url(&["reviews"])).json(&body)).await?;
        Ok(response.review)
    }

    pub async fn list_reviews(&self, restaurant_id: &str) -> Result<Vec<Review>, ServiceError> {
        let response: ReviewsResponse =
            send(self.client.get(self.url(&["reviews", restaurant_id]))).await?;
        Ok(response.reviews)
    }

    pub async fn like(&self, review_id: &str, user_name: &str) -> Result<u64, ServiceError> {
        self.like_request(Method::POST, review_id, user_name).await
    }

    pub async fn unlike(&self, review_id: &str, user_name: &str) -> Result<u64, ServiceError> {
        self.like_request(Method::DELETE, review_id, user_name).await
    }

    async fn like_request(
        &self,
        method: Method,
        review_id: &str,
        user_name: &str,
    ) -> Result<u64, ServiceError> {
        let request = self
            .client
            .request(method, self.url(&["reviews", review_id, "like"]))
            .json(&json!({ "userName": user_name }));
        let response: LikesResponse = send(request).await?;
        Ok(response.likes)
    }

    pub async fn has_liked(&self, review_id: &str, user_name: &str) -> Result<bool, ServiceError> {
        let url = self.url(&["reviews", review_id, "liked", user_name]);
        let response: LikedResponse = send(self.client.get(url)).await?;
        Ok(response.liked)
    }

    /// Reloads the reviews and re-derives the liked set from the server, one query per review.
    /// Cached liked state is never carried over.
    pub async fn refresh(
        &self,
        restaurant_id: &str,
        user_name: &str,
    ) -> Result<ReviewBoard, ServiceError> {
        let reviews = self.list_reviews(restaurant_id).await?;
        let mut liked = HashSet::new();
        for review in &reviews {
            if self.has_liked(&review.id, user_name).await? {
                liked.insert(review.id.clone());
            }
        }
        debug!(
            "Refreshed {} reviews for {} ({} liked by {})",
            reviews.len(),
            restaurant_id,
            liked.len(),
            user_name
        );
        Ok(ReviewBoard { reviews, liked })
    }

    /// Likes or unlikes depending on `board`'s current state.
    /// Returns `(liked, likes)` after the change.
    pub async fn toggle_like(
        &self,
        board: &ReviewBoard,
        review_id: &str,
        user_name: &str,
    ) -> Result<(bool, u64), ServiceError> {
        if let Some(review) = board.reviews.iter().find(|r| r.id == review_id) {
            if !board.can_like(review, user_name) {
                return Err(ServiceError::validation("You cannot like your own review"));
            }
        }
        if board.is_liked(review_id) {
            Ok((false, self.unlike(review_id, user_name).await?))
        } else {
            Ok((true, self.like(review_id, user_name).await?))
        }
    }
}

async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ServiceError> {
    let response = request
        .send()
        .await
        .map_err(|e| ServiceError::upstream(e.to_string()))?;

    let status = response.status();
    if status.is_success() {
        return response
            .json::<T>()
            .await
            .map_err(|e| ServiceError::upstream(format!("malformed response: {}", e)));
    }

    let message = match response.json::<ApiError>().await {
        Ok(body) => body.error,
        Err(_) => status.to_string(),
    };
    Err(match status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => ServiceError::Validation(message),
        StatusCode::NOT_FOUND => ServiceError::NotFound(message),
        StatusCode::CONFLICT => ServiceError::Conflict(message),
        _ => ServiceError::Upstream(message),
    })
}
