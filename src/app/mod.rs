pub mod review_service;
pub mod search_poller;
pub mod session;

pub use review_service::{NewReview, ReviewService};
pub use search_poller::{PollPolicy, RestaurantSource, SearchOutcome, SearchPollController};
pub use session::{update, EmptyReason, ReviewBoard, SessionAction, SessionState};
