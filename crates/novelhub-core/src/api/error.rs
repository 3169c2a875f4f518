use thiserror::Error;

use crate::store::StoreError;

#[derive(Error, Debug, Clone)]
pub enum ApiError {
    #[error("Story not found: {0}")]
    NotFound(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    /// Reserved for a real backend; in the mock setup only injected faults
    /// produce this.
    #[error("Transient failure: {0}")]
    Transient(String),
}

impl ApiError {
    /// Whether this failure means the referenced story does not exist.
    /// Callers surface these differently from validation problems.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }

    /// Whether retrying the same action could succeed. Terminal failures
    /// require the user to change their input first.
    pub fn is_transient(&self) -> bool {
        matches!(self, ApiError::Transient(_))
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ApiError::NotFound(id),
            StoreError::UnknownCategory(slug) => ApiError::UnknownCategory(slug),
            StoreError::Validation(message) => ApiError::Validation(message),
        }
    }
}
