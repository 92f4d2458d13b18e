use chrono::{DateTime, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// A star-rated review. Append-only: never updated or deleted once stored.
#[derive(Deserialize, Serialize, Debug, ToSchema, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub restaurant_id: String,
    pub user_name: String,
    pub rating: u8,
    pub comment: String,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    /// Always recomputed from like records when read; the stored value is ignored.
    #[serde(default)]
    pub likes: u64,
}

/// Value stored under a like-presence key. Its existence is the fact; the body is informational.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LikeRecord {
    pub user_name: String,
    pub liked_at: DateTime<Utc>,
}

/// `<restaurantId>_<unix millis>_<9 random base-36 chars>`.
pub fn generate_review_id(restaurant_id: &str, now: DateTime<Utc>) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .map(|c| (c as char).to_ascii_lowercase())
        .take(9)
        .collect();
    format!("{}_{}_{}", restaurant_id, now.timestamp_millis(), suffix)
}
