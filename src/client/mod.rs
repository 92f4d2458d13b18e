//! Clients a front end uses to reach the listing and review endpoints.

pub mod restaurants;
pub mod reviews;

pub use restaurants::HttpRestaurantSource;
pub use reviews::ReviewsClient;
