pub mod error;
pub mod model;
pub mod places;
pub mod ranking;

pub use error::ServiceError;
