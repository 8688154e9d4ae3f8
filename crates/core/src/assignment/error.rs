//! Assignment error types.

use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur while assigning payment sources to a batch.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssignmentError {
    /// Batch missing or unknown.
    #[error("Batch is required")]
    BatchRequired,

    /// Empty source list.
    #[error("At least one payment source is required")]
    NoSources,

    /// A listed source does not exist.
    #[error("Unknown payment source: {0}")]
    UnknownSource(Uuid),
}

impl AssignmentError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::BatchRequired => "BATCH_REQUIRED",
            Self::NoSources => "PAYMENT_SOURCE_REQUIRED",
            Self::UnknownSource(_) => "UNKNOWN_PAYMENT_SOURCE",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        400
    }
}
