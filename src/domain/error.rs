//! Error taxonomy shared by the review store, the place-search gateway and the poll controller.

use thiserror::Error;

/// Classified service error. Tells the caller *why* an operation failed so it can decide
/// whether to surface a message, retry, or ignore.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Missing or blank required field. Rejected before any mutation.
    #[error("{0}")]
    Validation(String),

    /// Duplicate action (e.g. liking the same review twice). Expected and recoverable.
    #[error("{0}")]
    Conflict(String),

    /// Operating on a record that is absent from storage.
    #[error("{0}")]
    NotFound(String),

    /// Search provider or listing endpoint answered non-2xx, a malformed payload, or could not
    /// be reached.
    #[error("upstream error: {0}")]
    Upstream(String),

    /// The key-value store itself failed.
    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl ServiceError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ServiceError::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        ServiceError::Conflict(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        ServiceError::NotFound(msg.into())
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        ServiceError::Upstream(msg.into())
    }

    /// HTTP status this error maps to at the server boundary.
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 400,
            ServiceError::Conflict(_) => 409,
            ServiceError::NotFound(_) => 404,
            ServiceError::Upstream(_) => 502,
            ServiceError::Storage(_) => 500,
        }
    }

    /// Plain-language summary suitable for showing to the end user.
    pub fn user_message(&self) -> String {
        match self {
            ServiceError::Validation(msg) | ServiceError::Conflict(msg) | ServiceError::NotFound(msg) => {
                msg.clone()
            }
            ServiceError::Upstream(_) => {
                "Restaurant search is unavailable right now. Please try again later.".to_string()
            }
            ServiceError::Storage(_) => "Something went wrong while saving. Please try again.".to_string(),
        }
    }

    /// 4xx-class errors are the caller's to handle; they never indicate a broken service.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ServiceError::Validation(_) | ServiceError::Conflict(_) | ServiceError::NotFound(_)
        )
    }
}
