pub mod app;
pub mod client;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::{ReviewService, SearchOutcome, SearchPollController};
pub use domain::model::{Mood, PriceRange, Restaurant, RestaurantId, Review, UserProfile};
pub use domain::ranking::rank;
pub use domain::ServiceError;
pub use storage::kv::{KvStore, MemoryKvStore, PostgresKvStore};
