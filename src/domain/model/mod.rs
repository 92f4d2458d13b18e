//! Domain types for restaurants, reviews and the client session.

pub mod profile;
pub mod restaurant;
pub mod review;

pub use profile::{Mood, PriceRange, UserProfile};
pub use restaurant::{Restaurant, RestaurantId, PLACEHOLDER_IMAGE_URL};
pub use review::{generate_review_id, LikeRecord, Review, MAX_RATING, MIN_RATING};
