//! The Review Store.
//!
//! Builds review and like records on top of a flat `KvStore`:
//! - `review:<reviewId>` holds the review body.
//! - `restaurant_reviews:<restaurantId>` holds the ordered list of that restaurant's review ids.
//! - `review_like:<reviewId>:<userName>` exists iff that user liked that review.
//!
//! Like counts are never trusted from storage. Every read recomputes them by counting like keys.
//!
//! Consistency: the store offers no transactions. Likes go through `set_if_absent`, so the
//! one-like-per-user guarantee is as strong as the backend's conditional put (atomic for both
//! shipped backends, check-then-set otherwise). Appending to the restaurant index is a
//! read-modify-write; two reviews created for the same restaurant at the same instant can lose
//! one index entry. The review body itself is always written first.

use crate::domain::error::ServiceError;
use crate::domain::model::{generate_review_id, LikeRecord, Review, MAX_RATING, MIN_RATING};
use crate::storage::kv::KvStore;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const REVIEW_PREFIX: &str = "review:";
pub const RESTAURANT_REVIEWS_PREFIX: &str = "restaurant_reviews:";
pub const REVIEW_LIKE_PREFIX: &str = "review_like:";

/// Separates the review id from the user name in like keys. Never allowed in restaurant ids.
pub const KEY_SEPARATOR: char = ':';

pub fn review_key(review_id: &str) -> String {
    format!("{}{}", REVIEW_PREFIX, review_id)
}

pub fn restaurant_reviews_key(restaurant_id: &str) -> String {
    format!("{}{}", RESTAURANT_REVIEWS_PREFIX, restaurant_id)
}

/// Prefix shared by every like of one review. The trailing `:` keeps `r1` from matching `r10`.
pub fn review_likes_prefix(review_id: &str) -> String {
    format!("{}{}{}", REVIEW_LIKE_PREFIX, review_id, KEY_SEPARATOR)
}

pub fn like_key(review_id: &str, user_name: &str) -> String {
    format!("{}{}", review_likes_prefix(review_id), user_name)
}

/// Input of `create_review`. Rating is wide so out-of-range values reach validation.
#[derive(Debug, Clone)]
pub struct NewReview {
    pub restaurant_id: String,
    pub user_name: String,
    pub rating: i64,
    pub comment: String,
}

impl NewReview {
    pub fn new(restaurant_id: &str, user_name: &str, rating: i64, comment: &str) -> Self {
        Self {
            restaurant_id: restaurant_id.to_string(),
            user_name: user_name.to_string(),
            rating,
            comment: comment.to_string(),
        }
    }

    /// Checks every field and returns the input with ids and user name trimmed.
    fn validate(self) -> Result<(NewReview, u8), ServiceError> {
        let restaurant_id = self.restaurant_id.trim();
        if restaurant_id.is_empty() {
            return Err(ServiceError::validation("restaurantId is required"));
        }
        // Review ids embed the restaurant id, and like keys use `:` as the separator.
        if restaurant_id.contains(KEY_SEPARATOR) {
            return Err(ServiceError::validation(format!(
                "restaurantId must not contain '{}'",
                KEY_SEPARATOR
            )));
        }
        let user_name = normalize_user_name(&self.user_name)?;
        if self.rating < MIN_RATING as i64 || self.rating > MAX_RATING as i64 {
            return Err(ServiceError::validation(format!(
                "rating must be between {} and {}",
                MIN_RATING, MAX_RATING
            )));
        }
        if self.comment.trim().is_empty() {
            return Err(ServiceError::validation("comment is required"));
        }
        let rating = self.rating as u8;
        Ok((
            NewReview {
                restaurant_id: restaurant_id.to_string(),
                user_name: user_name.to_string(),
                rating: self.rating,
                comment: self.comment,
            },
            rating,
        ))
    }
}

#[derive(Clone)]
pub struct ReviewService {
    store: Arc<dyn KvStore>,
}

impl ReviewService {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn KvStore> {
        &self.store
    }

    /// Validates, stores the review with zero likes, then appends it to the restaurant index.
    /// The same user may review the same restaurant any number of times.
    pub async fn create_review(&self, input: NewReview) -> Result<Review, ServiceError> {
        let (input, rating) = input.validate()?;

        let now = Utc::now();
        let review = Review {
            id: generate_review_id(&input.restaurant_id, now),
            restaurant_id: input.restaurant_id,
            user_name: input.user_name,
            rating,
            comment: input.comment,
            created_at: now,
            likes: 0,
        };

        self.store.set_as(&review_key(&review.id), &review).await?;

        let index_key = restaurant_reviews_key(&review.restaurant_id);
        let mut index: Vec<String> = self.load_index(&index_key).await?;
        index.push(review.id.clone());
        self.store.set_as(&index_key, &index).await?;

        info!(
            "Review created: {} for restaurant {}",
            review.id, review.restaurant_id
        );
        Ok(review)
    }

    /// Newest first. Index entries without a readable review record are skipped.
    pub async fn list_reviews(&self, restaurant_id: &str) -> Result<Vec<Review>, ServiceError> {
        let index = self
            .load_index(&restaurant_reviews_key(restaurant_id))
            .await?;

        let mut reviews = Vec::with_capacity(index.len());
        for review_id in &index {
            let mut review = match self.store.get_as::<Review>(&review_key(review_id)).await {
                Ok(Some(review)) => review,
                Ok(None) => {
                    debug!("Review {} listed for {} but missing, skipping", review_id, restaurant_id);
                    continue;
                }
                Err(e) => {
                    warn!("Review {} could not be decoded, skipping: {}", review_id, e);
                    continue;
                }
            };
            review.likes = self.count_likes(review_id).await?;
            reviews.push(review);
        }

        // Stable: reviews sharing a timestamp keep index order.
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        info!(
            "Retrieved {} reviews for restaurant {}",
            reviews.len(),
            restaurant_id
        );
        Ok(reviews)
    }

    /// Records a like. A second like by the same user is a `Conflict`, not a silent no-op.
    pub async fn like_review(&self, review_id: &str, user_name: &str) -> Result<u64, ServiceError> {
        let user_name = normalize_user_name(user_name)?;
        self.ensure_review_exists(review_id).await?;

        let record = LikeRecord {
            user_name: user_name.to_string(),
            liked_at: Utc::now(),
        };
        let value = serde_json::to_value(&record).map_err(anyhow::Error::from)?;
        let inserted = self
            .store
            .set_if_absent(&like_key(review_id, user_name), value)
            .await?;
        if !inserted {
            return Err(ServiceError::conflict("Already liked this review"));
        }

        let likes = self.count_likes(review_id).await?;
        info!("User {} liked review {}", user_name, review_id);
        Ok(likes)
    }

    /// Removes a like if present. Unliking twice is the same as unliking once.
    pub async fn unlike_review(&self, review_id: &str, user_name: &str) -> Result<u64, ServiceError> {
        let user_name = normalize_user_name(user_name)?;
        self.ensure_review_exists(review_id).await?;

        self.store.delete(&like_key(review_id, user_name)).await?;

        let likes = self.count_likes(review_id).await?;
        info!("User {} unliked review {}", user_name, review_id);
        Ok(likes)
    }

    /// A blank user name has liked nothing.
    pub async fn has_liked(&self, review_id: &str, user_name: &str) -> Result<bool, ServiceError> {
        let user_name = user_name.trim();
        if user_name.is_empty() {
            return Ok(false);
        }
        Ok(self.store.exists(&like_key(review_id, user_name)).await?)
    }

    /// Derived like count: the number of like-presence keys for the review.
    pub async fn count_likes(&self, review_id: &str) -> Result<u64, ServiceError> {
        let likes = self
            .store
            .scan_prefix(&review_likes_prefix(review_id))
            .await?;
        Ok(likes.len() as u64)
    }

    async fn ensure_review_exists(&self, review_id: &str) -> Result<(), ServiceError> {
        if self.store.exists(&review_key(review_id)).await? {
            Ok(())
        } else {
            Err(ServiceError::not_found(format!("Review '{}' not found", review_id)))
        }
    }

    async fn load_index(&self, index_key: &str) -> Result<Vec<String>, ServiceError> {
        let Some(raw) = self.store.get(index_key).await? else {
            return Ok(Vec::new());
        };
        match serde_json::from_value::<Vec<String>>(raw) {
            Ok(index) => Ok(index),
            Err(e) => {
                warn!("Review index {} is unreadable, treating as empty: {}", index_key, e);
                Ok(Vec::new())
            }
        }
    }
}

/// User names are compared trimmed everywhere, so ` bob` and `bob` are the same user.
pub fn normalize_user_name(user_name: &str) -> Result<&str, ServiceError> {
    let user_name = user_name.trim();
    if user_name.is_empty() {
        return Err(ServiceError::validation("userName is required"));
    }
    Ok(user_name)
}
